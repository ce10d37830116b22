use image::{RgbaImage, imageops};

use crate::foundation::core::PixelRect;

/// Copy `rect` out of `src`. The rectangle must lie within `src`.
pub fn crop(src: &RgbaImage, rect: PixelRect) -> RgbaImage {
    imageops::crop_imm(src, rect.x, rect.y, rect.width, rect.height).to_image()
}

/// Blow every source pixel up to a `scale x scale` block.
///
/// Pixel art must stay blocky, so this never interpolates; alpha is copied verbatim.
pub fn upscale_nearest(src: &RgbaImage, scale: u32) -> RgbaImage {
    if scale == 1 {
        return src.clone();
    }
    RgbaImage::from_fn(src.width() * scale, src.height() * scale, |x, y| {
        *src.get_pixel(x / scale, y / scale)
    })
}

pub fn mirror_horizontal(src: &RgbaImage) -> RgbaImage {
    imageops::flip_horizontal(src)
}

/// Smallest alpha value inside `rect`.
pub fn min_alpha(src: &RgbaImage, rect: PixelRect) -> u8 {
    let mut min = u8::MAX;
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            min = min.min(src.get_pixel(x, y).0[3]);
            if min == 0 {
                return 0;
            }
        }
    }
    min
}

#[cfg(test)]
#[path = "../../tests/unit/sample/pixels.rs"]
mod tests;
