//! Image pipeline for round icons: decode, square crop, resize, mask, encode

mod decode;
mod encode;
mod mask;
mod transform;

// Re-export public API
pub use decode::decode_rgba;
pub use encode::{compress_to_png, save_png, PngCompression};
pub use mask::{apply_mask, circle_mask};
pub use transform::{square_region, CropRegion};

use anyhow::{ensure, Result};
use imageproc::image::RgbaImage;

/// Turn a decoded RGBA image into a round icon.
///
/// `size` of `None` keeps the edge of the centered square crop.
pub fn round_icon(img: &RgbaImage, size: Option<u32>) -> Result<(RgbaImage, CropRegion)> {
    let (width, height) = img.dimensions();
    ensure!(width > 0 && height > 0, "Source image is empty ({width}x{height})");
    if let Some(size) = size {
        ensure!(size > 0, "Icon size must be greater than 0");
    }

    let (square, region) = transform::crop_square(img);
    log::debug!(
        "Cropped {width}x{height} to ({},{})-({},{})",
        region.left,
        region.top,
        region.right(),
        region.bottom()
    );

    let square = match size {
        Some(size) => transform::resize_square(square, size)?,
        None => square,
    };

    let mask = circle_mask(square.width());
    Ok((apply_mask(&square, &mask), region))
}
