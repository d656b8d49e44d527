//! PNG encoding and output writing

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use imageproc::image::codecs::png::{CompressionType, FilterType, PngEncoder};
use imageproc::image::{ExtendedColorType, ImageEncoder, RgbaImage};
use tempfile::NamedTempFile;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PngCompression {
    Fast,
    #[default]
    Default,
    Best,
}

impl PngCompression {
    pub fn iter() -> impl Iterator<Item = Self> {
        <Self as strum::IntoEnumIterator>::iter()
    }
}

/// Compress an RGBA image to PNG with the specified compression level
pub fn compress_to_png<W>(img: &RgbaImage, writer: &mut W, compression: PngCompression) -> Result<()>
where
    W: std::io::Write,
{
    let compression_type = match compression {
        PngCompression::Fast => CompressionType::Fast,
        PngCompression::Default => CompressionType::Default,
        PngCompression::Best => CompressionType::Best,
    };

    let encoder = PngEncoder::new_with_quality(writer, compression_type, FilterType::Adaptive);

    encoder
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            ExtendedColorType::Rgba8,
        )
        .with_context(|| "Failed to compress image to PNG")?;

    Ok(())
}

/// Encode `img` and write it to `path`.
///
/// The bytes land in a temp file next to `path` and are renamed over it, so a
/// failure never leaves a truncated PNG behind or clobbers the previous one.
pub fn save_png(img: &RgbaImage, path: &Path, compression: PngCompression) -> Result<()> {
    let (width, height) = img.dimensions();
    let mut buffer = Vec::with_capacity(width as usize * height as usize);
    compress_to_png(img, &mut buffer, compression)?;

    write_atomic(path, &buffer)?;

    log::trace!(
        "Wrote {} ({} bytes, compression {compression})",
        path.display(),
        buffer.len()
    );
    Ok(())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    file.write_all(bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    file.flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;

    file.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}
