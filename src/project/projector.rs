use image::{Rgba, RgbaImage};

use crate::{
    atlas::regions::Face,
    foundation::{
        core::{Offset, Point, Rect, TRANSPARENT, check_scale},
        error::{IsoskinError, IsoskinResult},
    },
    project::geometry::{self, Axis, AxisFrame},
    sample::sampler::RenderedPart,
};

/// A part after the isometric warp, cropped to the canvas pixels it covers.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectedFace {
    pub face: Face,
    pub axis: Axis,
    /// Warped pixels; transparent wherever the face does not land.
    pub image: RgbaImage,
    /// Where `image` goes on the full-body canvas.
    pub offset: Offset,
}

/// Warp a sampled part along `axis` onto the full-body canvas of the given scale.
///
/// Laying the part out on its axis layer and warping the layer onto the canvas is folded into
/// one canvas -> part lookup, evaluated only over the face's bounding box.
/// Sampling is nearest-neighbour, so every output pixel is a verbatim copy of one part pixel
/// (alpha included) or fully transparent.
pub fn project(part: &RenderedPart, axis: Axis, scale: u32) -> IsoskinResult<ProjectedFace> {
    check_scale(scale)?;
    if part.scale != scale {
        return Err(IsoskinError::validation(format!(
            "part '{}' was sampled at scale {} but projected at scale {scale}",
            part.face, part.scale
        )));
    }
    if Axis::of(part.face) != axis {
        return Err(IsoskinError::validation(format!(
            "face '{}' is not visible along the {} axis",
            part.face,
            axis.name()
        )));
    }

    let frame = geometry::axis_frame(axis, scale);
    let at = geometry::placement(part.face, scale, part.arms);
    let (canvas_w, canvas_h) = geometry::canvas_size(scale);

    let Some((x0, y0, x1, y1)) = canvas_bounds(&frame, at, part, (canvas_w, canvas_h)) else {
        return Ok(ProjectedFace {
            face: part.face,
            axis,
            image: RgbaImage::new(0, 0),
            offset: Offset::ZERO,
        });
    };

    let (pw, ph) = (i64::from(part.image.width()), i64::from(part.image.height()));
    let (lw, lh) = (i64::from(frame.layer_size.0), i64::from(frame.layer_size.1));

    let width = (x1 - x0) as u32;
    let height = (y1 - y0) as u32;
    let image = RgbaImage::from_fn(width, height, |x, y| {
        let u = x0 + i64::from(x);
        let v = y0 + i64::from(y);
        let src = frame.map * Point::new(u as f64 + 0.5, v as f64 + 0.5);
        let (lx, ly) = (src.x.floor() as i64, src.y.floor() as i64);
        if lx < 0 || ly < 0 || lx >= lw || ly >= lh {
            return Rgba(TRANSPARENT);
        }

        let (px, py) = (lx - at.dx, ly - at.dy);
        if px < 0 || py < 0 || px >= pw || py >= ph {
            return Rgba(TRANSPARENT);
        }
        *part.image.get_pixel(px as u32, py as u32)
    });

    Ok(ProjectedFace {
        face: part.face,
        axis,
        image,
        offset: Offset::new(x0, y0),
    })
}

/// Canvas pixel range `[x0, x1) x [y0, y1)` that can receive pixels of the part.
fn canvas_bounds(
    frame: &AxisFrame,
    at: Offset,
    part: &RenderedPart,
    canvas: (u32, u32),
) -> Option<(i64, i64, i64, i64)> {
    let part_rect = Rect::new(
        at.dx as f64,
        at.dy as f64,
        (at.dx + i64::from(part.image.width())) as f64,
        (at.dy + i64::from(part.image.height())) as f64,
    );
    let warped = frame.map.inverse().transform_rect_bbox(part_rect);

    // Pixel centres sit at +0.5; one extra pixel on each side absorbs float error.
    let x0 = (warped.x0 - 0.5).floor() as i64 - 1;
    let y0 = (warped.y0 - 0.5).floor() as i64 - 1;
    let x1 = (warped.x1 - 0.5).ceil() as i64 + 2;
    let y1 = (warped.y1 - 0.5).ceil() as i64 + 2;

    let x0 = x0.max(0);
    let y0 = y0.max(0);
    let x1 = x1.min(i64::from(canvas.0));
    let y1 = y1.min(i64::from(canvas.1));
    (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
}

#[cfg(test)]
#[path = "../../tests/unit/project/projector.rs"]
mod tests;
