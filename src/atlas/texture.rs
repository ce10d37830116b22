use std::io::Cursor;

use image::{ImageReader, RgbaImage};

use crate::{
    atlas::regions::{ArmModel, AtlasLayout, RegionTable, region_table},
    foundation::error::{IsoskinError, IsoskinResult},
};

/// Every supported atlas is this wide.
pub const ATLAS_WIDTH: u32 = 64;

/// Whether the overlay layer of a modern atlas should be merged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayHint {
    /// Infer per body group from the atlas pixels (min-alpha heuristic).
    #[default]
    Auto,
    /// Upstream metadata says the overlay layer is authored: always merge.
    Present,
    /// Upstream metadata says there is no overlay: never merge.
    Absent,
}

/// A decoded skin texture plus the flags that select its region table.
///
/// Immutable once built; a render borrows it and never writes to it.
#[derive(Clone, Debug)]
pub struct SkinAtlas {
    pixels: RgbaImage,
    layout: AtlasLayout,
    arms: ArmModel,
    overlay: OverlayHint,
}

impl SkinAtlas {
    /// Decode encoded image bytes into an atlas.
    ///
    /// Dimensions are checked from the image header before the pixel data is decoded, so an
    /// oversized texture is rejected without allocating for it.
    #[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
    pub fn parse(bytes: &[u8], is_slim: bool) -> IsoskinResult<Self> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(image::ImageError::IoError)?;
        let (width, height) = reader.into_dimensions()?;
        layout_for(width, height)?;

        let decoded = image::load_from_memory(bytes)?;
        Self::from_rgba(decoded.to_rgba8(), is_slim)
    }

    /// Wrap an already decoded RGBA8 buffer.
    pub fn from_rgba(pixels: RgbaImage, is_slim: bool) -> IsoskinResult<Self> {
        let layout = layout_for(pixels.width(), pixels.height())?;
        let arms = ArmModel::from_slim(is_slim);
        tracing::debug!(layout = layout.name(), arms = arms.name(), "skin atlas ready");
        Ok(Self {
            pixels,
            layout,
            arms,
            overlay: OverlayHint::Auto,
        })
    }

    /// Replace the overlay inference with an explicit upstream flag.
    pub fn with_overlay_hint(mut self, overlay: OverlayHint) -> Self {
        self.overlay = overlay;
        self
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn layout(&self) -> AtlasLayout {
        self.layout
    }

    pub fn arms(&self) -> ArmModel {
        self.arms
    }

    pub fn overlay_hint(&self) -> OverlayHint {
        self.overlay
    }

    pub fn is_legacy_layout(&self) -> bool {
        self.layout == AtlasLayout::Legacy
    }

    pub fn is_slim_arms(&self) -> bool {
        self.arms == ArmModel::Slim
    }

    pub fn regions(&self) -> &'static RegionTable {
        region_table(self.layout, self.arms)
    }
}

fn layout_for(width: u32, height: u32) -> IsoskinResult<AtlasLayout> {
    match (width, height) {
        (ATLAS_WIDTH, 32) => Ok(AtlasLayout::Legacy),
        (ATLAS_WIDTH, 64) => Ok(AtlasLayout::Modern),
        _ => Err(IsoskinError::InvalidDimensions { width, height }),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/atlas/texture.rs"]
mod tests;
