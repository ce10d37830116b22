use crate::foundation::error::{IsoskinError, IsoskinResult};

pub use kurbo::{Affine, Point, Rect};

/// Straight (non-premultiplied) RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Fully transparent pixel; the background of every buffer this crate produces.
pub const TRANSPARENT: Rgba8 = [0, 0, 0, 0];

/// Largest accepted integer scale factor.
///
/// A full-body canvas at this scale is 1280x2880 pixels.
pub const MAX_SCALE: u32 = 64;

/// Validate an integer upscale factor.
pub fn check_scale(scale: u32) -> IsoskinResult<u32> {
    if scale == 0 || scale > MAX_SCALE {
        return Err(IsoskinError::InvalidScale(scale));
    }
    Ok(scale)
}

/// Axis-aligned pixel rectangle inside an atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(self) -> u32 {
        self.y + self.height
    }

    /// Whether the rectangle is non-empty and lies entirely within a `width x height` image.
    pub fn fits_within(self, width: u32, height: u32) -> bool {
        self.width > 0 && self.height > 0 && self.right() <= width && self.bottom() <= height
    }
}

/// Integer pixel offset of a buffer pasted onto a larger canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub dx: i64,
    pub dy: i64,
}

impl Offset {
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    pub const fn new(dx: i64, dy: i64) -> Self {
        Self { dx, dy }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
