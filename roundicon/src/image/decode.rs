//! Image decoding

use std::path::Path;

use anyhow::Context;
use imageproc::image::error::{ImageFormatHint, UnsupportedErrorKind};
use imageproc::image::{ImageError, ImageFormat, ImageReader, RgbaImage};

use crate::error::IconError;

/// Open `path`, sniff its format from the content and decode it to RGBA.
pub fn decode_rgba(path: &Path) -> Result<RgbaImage, IconError> {
    let reader = ImageReader::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let format = reader
        .format()
        .with_context(|| format!("Unrecognized image format: {}", path.display()))?;
    ensure_decodable(format)?;

    let img = reader.decode().map_err(|e| match missing_decoder(&e) {
        Some(format) => IconError::MissingDependency { format },
        None => anyhow::Error::new(e)
            .context(format!("Failed to decode {}", path.display()))
            .into(),
    })?;

    log::debug!(
        "Decoded {} ({format:?}, {}x{})",
        path.display(),
        img.width(),
        img.height()
    );

    Ok(img.into_rgba8())
}

/// Recognized formats whose decoder was compiled out are a missing dependency,
/// not a broken file.
pub(crate) fn ensure_decodable(format: ImageFormat) -> Result<(), IconError> {
    if format.reading_enabled() {
        Ok(())
    } else {
        Err(IconError::MissingDependency { format })
    }
}

/// Format named by an "unsupported format" decode error.
///
/// Some formats report reading as enabled while only their encoder is built,
/// so the decoder's own verdict has the last word.
fn missing_decoder(err: &ImageError) -> Option<ImageFormat> {
    match err {
        ImageError::Unsupported(e) => match e.kind() {
            UnsupportedErrorKind::Format(ImageFormatHint::Exact(format)) => Some(format),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::image::Rgba;

    #[test]
    fn missing_file_mentions_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");

        let err = decode_rgba(&path).unwrap_err();
        assert!(!err.is_missing_dependency());
        assert!(err.to_string().contains("missing.png"));
    }

    #[test]
    fn garbage_is_unrecognized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.png");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let err = decode_rgba(&path).unwrap_err();
        assert!(matches!(err, IconError::Failed(_)));
    }

    #[test]
    fn decodes_png_as_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("source.png");
        let src = imageproc::image::RgbImage::from_pixel(3, 2, imageproc::image::Rgb([10, 20, 30]));
        src.save(&path).unwrap();

        let img = decode_rgba(&path).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(*img.get_pixel(1, 1), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn unsupported_format_error_names_the_format() {
        use imageproc::image::error::UnsupportedError;

        let err = ImageError::Unsupported(UnsupportedError::from_format_and_kind(
            ImageFormatHint::Exact(ImageFormat::Avif),
            UnsupportedErrorKind::Format(ImageFormatHint::Exact(ImageFormat::Avif)),
        ));
        assert_eq!(missing_decoder(&err), Some(ImageFormat::Avif));

        let io = ImageError::IoError(std::io::Error::other("disk gone"));
        assert_eq!(missing_decoder(&io), None);
    }

    #[test]
    fn disabled_decoder_is_missing_dependency() {
        assert!(ensure_decodable(ImageFormat::Png).is_ok());

        // Only meaningful when some format is compiled without a decoder.
        if let Some(format) = ImageFormat::all().find(|f| !f.reading_enabled()) {
            let err = ensure_decodable(format).unwrap_err();
            assert!(err.is_missing_dependency());
        }
    }
}
