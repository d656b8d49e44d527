//! Image transformations: centered square crop and resizing

use anyhow::{Context, Result};
use fast_image_resize as fr;
use fr::images::Image as FrImage;
use imageproc::image::{imageops, RgbaImage};

/// Square sub-region of a source image, in source pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CropRegion {
    pub left: u32,
    pub top: u32,
    pub edge: u32,
}

impl CropRegion {
    pub fn right(&self) -> u32 {
        self.left + self.edge
    }

    pub fn bottom(&self) -> u32 {
        self.top + self.edge
    }
}

/// Centered square spanning the shorter side of a `width` x `height` image
pub fn square_region(width: u32, height: u32) -> CropRegion {
    if width > height {
        CropRegion {
            left: (width - height) / 2,
            top: 0,
            edge: height,
        }
    } else {
        CropRegion {
            left: 0,
            top: (height - width) / 2,
            edge: width,
        }
    }
}

/// Crop the centered square out of `img`
pub(super) fn crop_square(img: &RgbaImage) -> (RgbaImage, CropRegion) {
    let (width, height) = img.dimensions();
    let region = square_region(width, height);

    let cropped = imageops::crop_imm(img, region.left, region.top, region.edge, region.edge);
    (cropped.to_image(), region)
}

/// Resize a square image to `edge` x `edge` with Lanczos3
pub(super) fn resize_square(img: RgbaImage, edge: u32) -> Result<RgbaImage> {
    let (width, height) = img.dimensions();
    if width == edge && height == edge {
        return Ok(img);
    }

    log::debug!("Resizing {width}x{height} -> {edge}x{edge}");

    let src_image = FrImage::from_vec_u8(width, height, img.into_raw(), fr::PixelType::U8x4)
        .context("Failed to wrap source pixels for resizing")?;
    let mut dst_image = FrImage::new(edge, edge, fr::PixelType::U8x4);

    let mut resizer = fr::Resizer::new();
    resizer
        .resize(
            &src_image,
            &mut dst_image,
            Some(
                &fr::ResizeOptions::new()
                    .resize_alg(fr::ResizeAlg::Convolution(fr::FilterType::Lanczos3)),
            ),
        )
        .context("Failed to resize image")?;

    RgbaImage::from_raw(edge, edge, dst_image.into_vec())
        .context("Resized buffer does not match the requested dimensions")
}
