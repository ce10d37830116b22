use image::RgbaImage;

use crate::{
    atlas::{
        regions::{ArmModel, BodyGroup, Face, Layer, RegionName, RegionSource},
        texture::{OverlayHint, SkinAtlas},
    },
    effects::composite::over_at,
    foundation::{
        core::{Offset, check_scale},
        error::{IsoskinError, IsoskinResult},
    },
    sample::pixels,
};

/// One face of the avatar cut out of the atlas and upscaled, overlay already merged.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedPart {
    pub face: Face,
    pub scale: u32,
    /// Arm model of the atlas the part came from; arm placement depends on it.
    pub arms: ArmModel,
    pub image: RgbaImage,
}

/// Sample a face: crop the base region, upscale it and merge the overlay when one is present.
pub fn sample(atlas: &SkinAtlas, face: Face, scale: u32) -> IsoskinResult<RenderedPart> {
    check_scale(scale)?;
    let mut image = layer_image(atlas, RegionName::base(face), scale)?;

    if overlay_applies(atlas, face.group()) {
        let overlay = layer_image(atlas, RegionName::overlay(face), scale)?;
        over_at(&mut image, &overlay, Offset::ZERO);
    }

    Ok(RenderedPart {
        face,
        scale,
        arms: atlas.arms(),
        image,
    })
}

/// Sample a single layer of a face without any merging.
pub fn sample_layer(
    atlas: &SkinAtlas,
    region: RegionName,
    scale: u32,
) -> IsoskinResult<RenderedPart> {
    check_scale(scale)?;
    Ok(RenderedPart {
        face: region.face,
        scale,
        arms: atlas.arms(),
        image: layer_image(atlas, region, scale)?,
    })
}

/// Sample by region name: `"<face>"` for the merged face, `"<face>/overlay"` for the bare
/// overlay layer.
pub fn sample_named(atlas: &SkinAtlas, name: &str, scale: u32) -> IsoskinResult<RenderedPart> {
    let (face_name, overlay) = match name.strip_suffix("/overlay") {
        Some(face) => (face, true),
        None => (name, false),
    };
    let face = Face::from_name(face_name).ok_or_else(|| unknown_region(atlas, name))?;
    if overlay {
        sample_layer(atlas, RegionName::overlay(face), scale)
    } else {
        sample(atlas, face, scale)
    }
}

/// Whether the overlay rectangle of `group` carries any transparency.
///
/// Authored overlays are expected to contain transparent pixels, so a fully opaque rectangle is
/// read as "no overlay". This is a heuristic: a deliberately opaque overlay is suppressed.
pub fn overlay_present(atlas: &SkinAtlas, group: BodyGroup) -> bool {
    let Some(rect) = atlas.regions().overlay_group(group) else {
        return false;
    };
    let min_alpha = pixels::min_alpha(atlas.pixels(), rect);
    let present = min_alpha < u8::MAX;
    tracing::debug!(group = group.name(), min_alpha, present, "overlay detection");
    present
}

fn overlay_applies(atlas: &SkinAtlas, group: BodyGroup) -> bool {
    if atlas.is_legacy_layout() {
        return false;
    }
    match atlas.overlay_hint() {
        OverlayHint::Auto => overlay_present(atlas, group),
        OverlayHint::Present => true,
        OverlayHint::Absent => false,
    }
}

fn layer_image(atlas: &SkinAtlas, region: RegionName, scale: u32) -> IsoskinResult<RgbaImage> {
    let table = atlas.regions();
    let source = table
        .lookup(region)
        .ok_or_else(|| unknown_region(atlas, &region.to_string()))?;

    let cropped = match source {
        RegionSource::Rect(rect) => {
            if !rect.fits_within(atlas.pixels().width(), atlas.pixels().height()) {
                return Err(unknown_region(atlas, &region.to_string()));
            }
            pixels::crop(atlas.pixels(), rect)
        }
        RegionSource::Mirror(of) if region.layer == Layer::Base => {
            let Some(RegionSource::Rect(rect)) = table.lookup(RegionName::base(of)) else {
                return Err(unknown_region(atlas, &region.to_string()));
            };
            pixels::mirror_horizontal(&pixels::crop(atlas.pixels(), rect))
        }
        RegionSource::Mirror(_) => return Err(unknown_region(atlas, &region.to_string())),
    };

    Ok(pixels::upscale_nearest(&cropped, scale))
}

fn unknown_region(atlas: &SkinAtlas, region: &str) -> IsoskinError {
    IsoskinError::UnknownRegion {
        region: region.to_string(),
        layout: atlas.layout().name(),
        arms: atlas.arms().name(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sample/sampler.rs"]
mod tests;
