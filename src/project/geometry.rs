//! Fixed isometric geometry for the posed avatar.
//!
//! The projection is not a 3D camera. Each visible axis has a hand-fitted shear+scale map
//! (written canvas -> layer, sampled at pixel centres). The side and front maps share one row
//! nudge and the top map's translation is derived from it, so faces that share an edge in the
//! pose meet on the canvas with no transparent pixels between them.
//! Changing any constant here shifts pixels; the golden-image tests must be re-blessed
//! deliberately when that is intended.

use crate::{
    atlas::regions::{ArmModel, Face},
    foundation::core::{Affine, Offset},
};

/// Full-body canvas size in scale units.
pub const CANVAS_UNITS: (u32, u32) = (20, 45);

/// Bust canvas size in scale units (one head face).
pub const BUST_UNITS: u32 = 8;

/// Vertical foreshortening shared by all three axes.
pub const FORESHORTEN: f64 = 45.0 / 52.0;

/// Top faces: rotate the floor plane 45 degrees and squash it. The translation is filled in
/// per scale by [`axis_frame`].
pub const TOP_MAP: [f64; 6] = [0.5, -FORESHORTEN, 0.0, 0.5, FORESHORTEN, 0.0];

/// Row nudge shared by the side and front maps. Both must use the same value or the vertical
/// edge where a side face meets a front face opens up.
pub const ROW_NUDGE: f64 = -0.5;

/// Right-hand side faces: shear up to the right.
pub const RIGHT_MAP: [f64; 6] = [1.0, 0.0, 0.0, -0.5, FORESHORTEN, ROW_NUDGE];

/// Front faces: shear down to the right.
pub const FRONT_MAP: [f64; 6] = [1.0, 0.0, 0.0, 0.5, FORESHORTEN, ROW_NUDGE];

/// The top layer is laid out on a canvas this many times larger than the final one.
pub const TOP_LAYER_FACTOR: u32 = 4;

/// Anchor of the body inside its layers, in scale units.
const X_ANCHOR: i64 = 2;
const Z_ANCHOR: i64 = 3;

/// One of the three visible axes of the isometric camera.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Top,
    RightFace,
    FrontFace,
}

impl Axis {
    /// The axis a face is seen along in the canonical pose.
    pub fn of(face: Face) -> Self {
        match face {
            Face::HeadTop | Face::ArmRightTop | Face::ArmLeftTop => Self::Top,
            Face::HeadRight | Face::ArmRightSide | Face::LegRightSide => Self::RightFace,
            Face::HeadFront
            | Face::ArmRightFront
            | Face::ArmLeftFront
            | Face::LegRightFront
            | Face::LegLeftFront
            | Face::TorsoFront => Self::FrontFace,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::RightFace => "right",
            Self::FrontFace => "front",
        }
    }
}

/// Warp parameters of one axis at a given scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisFrame {
    /// Canvas -> layer map, applied to pixel centres.
    pub map: Affine,
    /// Size of the layer the parts are laid out on.
    pub layer_size: (u32, u32),
}

/// Build a kurbo affine from `(a, b, c, d, e, f)` with `x' = a*x + b*y + c`,
/// `y' = d*x + e*y + f`.
pub fn map_affine(m: [f64; 6]) -> Affine {
    Affine::new([m[0], m[3], m[1], m[4], m[2], m[5]])
}

/// Full-body canvas size in pixels.
pub fn canvas_size(scale: u32) -> (u32, u32) {
    (CANVAS_UNITS.0 * scale, CANVAS_UNITS.1 * scale)
}

/// Where the body's origin sits on the enlarged top layer.
fn top_layer_origin(scale: u32) -> (i64, i64) {
    let (cw, ch) = canvas_size(scale);
    (
        i64::from(cw * TOP_LAYER_FACTOR - cw) / 2,
        i64::from(ch * TOP_LAYER_FACTOR - ch) / 2,
    )
}

/// Translation `(c, f)` of the top map at `scale`.
///
/// A floor-plane point `top(x, y, z)` lands on the same canvas position as `front(x, y, z)`
/// and `side(x, y, z)`. The value is fractional in general; rounding it to whole pixels opens
/// one-pixel seams along the top edges at some scales.
fn top_translation(scale: u32) -> (f64, f64) {
    let (ox, oy) = top_layer_origin(scale);
    let shift_x = -((ox + oy) as f64);
    let shift_y = ((ox - oy) as f64 - 2.0 * ROW_NUDGE) / (2.0 * FORESHORTEN);
    (
        -0.5 * shift_x + FORESHORTEN * shift_y,
        -0.5 * shift_x - FORESHORTEN * shift_y,
    )
}

pub fn axis_frame(axis: Axis, scale: u32) -> AxisFrame {
    let (cw, ch) = canvas_size(scale);
    match axis {
        Axis::Top => {
            let (c, f) = top_translation(scale);
            let [a, b, _, d, e, _] = TOP_MAP;
            AxisFrame {
                map: map_affine([a, b, c, d, e, f]),
                layer_size: (cw * TOP_LAYER_FACTOR, ch * TOP_LAYER_FACTOR),
            }
        }
        Axis::RightFace => AxisFrame {
            map: map_affine(RIGHT_MAP),
            layer_size: (cw, ch),
        },
        Axis::FrontFace => AxisFrame {
            map: map_affine(FRONT_MAP),
            layer_size: (cw, ch),
        },
    }
}

/// Top-left corner of a face inside its axis layer.
pub fn placement(face: Face, scale: u32, arms: ArmModel) -> Offset {
    let s = i64::from(scale);
    let w = i64::from(arms.width());

    // Top layer: the body is centred on the enlarged layer, then laid out on the floor
    // plane as (y - z, x + z).
    let (top_cx, top_cy) = top_layer_origin(scale);
    let top = |x: i64, y: i64, z: i64| Offset::new(y - z + top_cx, x + z + top_cy);
    // Side layer: (x + y, z - y).
    let side = |x: i64, y: i64, z: i64| Offset::new(x + y, z - y);
    // Front layer: (x + y, x + z).
    let front = |x: i64, y: i64, z: i64| Offset::new(x + y, x + z);

    let x0 = X_ANCHOR * s;
    let z0 = Z_ANCHOR * s;
    let shoulder_x = x0 + 2 * s;
    let shoulder_z = z0 + 8 * s;

    // The body front is one 16x24-unit block anchored at front(shoulder_x, 0, z0 + 12s);
    // arms, torso and legs are offsets inside it.
    let block = front(shoulder_x, 0, z0 + 12 * s);
    let body_front = |bx: i64, by: i64| Offset::new(block.dx + bx, block.dy + by);

    match face {
        Face::ArmRightTop => top(shoulder_x, -w * s, shoulder_z),
        Face::ArmLeftTop => top(shoulder_x, 8 * s, shoulder_z),
        Face::HeadTop => top(x0, 0, z0),

        Face::LegRightSide => side(shoulder_x, 0, z0 + 20 * s),
        Face::ArmRightSide => side(shoulder_x, -w * s, shoulder_z),
        Face::HeadRight => side(x0, 0, z0),

        Face::HeadFront => front(x0 + 8 * s, 0, z0),
        Face::ArmRightFront => body_front((4 - w) * s, 0),
        Face::ArmLeftFront => body_front(12 * s, 0),
        Face::TorsoFront => body_front(4 * s, 0),
        Face::LegRightFront => body_front(4 * s, 12 * s),
        Face::LegLeftFront => body_front(8 * s, 12 * s),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/project/geometry.rs"]
mod tests;
