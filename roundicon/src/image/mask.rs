//! Circular alpha masking

use imageproc::drawing::draw_filled_ellipse_mut;
use imageproc::image::{imageops, GrayImage, Luma, Rgba, RgbaImage};

const TRANSPARENT: u8 = 0;
const OPAQUE: u8 = 255;

/// `edge` x `edge` mask holding the filled circle inscribed in its bounds
pub fn circle_mask(edge: u32) -> GrayImage {
    let mut mask = GrayImage::from_pixel(edge, edge, Luma([TRANSPARENT]));

    let center = (edge / 2) as i32;
    let radius = (edge / 2) as i32;
    draw_filled_ellipse_mut(&mut mask, (center, center), radius, radius, Luma([OPAQUE]));

    mask
}

/// Paste `img` onto a transparent canvas and replace its alpha with `mask`.
///
/// Color is kept everywhere; alpha comes from the mask alone, so pixels inside
/// the circle end up fully opaque whatever the source alpha was.
pub fn apply_mask(img: &RgbaImage, mask: &GrayImage) -> RgbaImage {
    debug_assert_eq!(img.dimensions(), mask.dimensions());

    let (width, height) = mask.dimensions();
    let mut out = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, TRANSPARENT]));
    imageops::replace(&mut out, img, 0, 0);

    for (pixel, alpha) in out.pixels_mut().zip(mask.pixels()) {
        pixel[3] = alpha[0];
    }

    out
}
