use image::RgbaImage;

use crate::foundation::core::{Offset, Rgba8};

/// Straight-alpha source-over.
///
/// A transparent source leaves `dst` untouched and an opaque source replaces it, so
/// layering opaque pixel art never drifts.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let sa = u32::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let da = u32::from(dst[3]);
    let src_w = sa * 255;
    let dst_w = da * (255 - sa);
    let out_a255 = src_w + dst_w;

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = u32::from(src[i]) * src_w + u32::from(dst[i]) * dst_w;
        out[i] = ((c + out_a255 / 2) / out_a255) as u8;
    }
    out[3] = ((out_a255 + 127) / 255) as u8;
    out
}

/// Composite `src` over `dst` with its top-left corner at `at`, clipping to `dst`.
pub fn over_at(dst: &mut RgbaImage, src: &RgbaImage, at: Offset) {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    let (sw, sh) = (i64::from(src.width()), i64::from(src.height()));

    let x0 = at.dx.max(0);
    let y0 = at.dy.max(0);
    let x1 = (at.dx + sw).min(dw);
    let y1 = (at.dy + sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for y in y0..y1 {
        for x in x0..x1 {
            let s = src.get_pixel((x - at.dx) as u32, (y - at.dy) as u32).0;
            if s[3] == 0 {
                continue;
            }
            let d = dst.get_pixel_mut(x as u32, y as u32);
            d.0 = over(d.0, s);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
