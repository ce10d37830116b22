use std::{io::Cursor, path::Path, str::FromStr};

use anyhow::Context;
use image::{ImageFormat, RgbaImage};

use crate::{
    atlas::{
        regions::Face,
        texture::{OverlayHint, SkinAtlas},
    },
    effects::composite::over_at,
    foundation::{
        core::check_scale,
        error::{IsoskinError, IsoskinResult},
    },
    project::{
        geometry::{self, Axis},
        projector::project,
    },
    sample::sampler::sample,
};

/// What to render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Flat head front, `8s x 8s`.
    Bust,
    /// Posed isometric avatar, `20s x 45s`.
    #[default]
    FullBody,
}

impl RenderMode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Bust => "bust",
            Self::FullBody => "full_body",
        }
    }
}

impl FromStr for RenderMode {
    type Err = IsoskinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bust" => Ok(Self::Bust),
            "full_body" | "full-body" | "fullbody" => Ok(Self::FullBody),
            _ => Err(IsoskinError::unsupported_mode(s)),
        }
    }
}

/// Paste order of the full-body faces, farthest first.
///
/// Tops, then the limb sides, then the fronts. The head overhangs the torso, so its side
/// face is nearer than the body fronts and goes last.
pub const PAINT_ORDER: [Face; Face::COUNT] = [
    Face::ArmRightTop,
    Face::ArmLeftTop,
    Face::HeadTop,
    Face::LegRightSide,
    Face::ArmRightSide,
    Face::ArmRightFront,
    Face::ArmLeftFront,
    Face::TorsoFront,
    Face::LegRightFront,
    Face::LegLeftFront,
    Face::HeadFront,
    Face::HeadRight,
];

/// A finished render: straight RGBA8 on a transparent background.
#[derive(Clone, Debug, PartialEq)]
pub struct AvatarCanvas {
    pub mode: RenderMode,
    pub scale: u32,
    pub image: RgbaImage,
}

impl AvatarCanvas {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Encode as PNG.
    pub fn encode_png(&self) -> IsoskinResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .context("encode avatar png")?;
        Ok(buf)
    }

    /// Write a PNG, creating parent directories as needed.
    pub fn save_png(&self, path: &Path) -> IsoskinResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        self.image
            .save_with_format(path, ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Render an atlas. Pure: the same atlas, mode and scale always give the same pixels.
#[tracing::instrument(skip(atlas), fields(layout = atlas.layout().name(), arms = atlas.arms().name()))]
pub fn compose(atlas: &SkinAtlas, mode: RenderMode, scale: u32) -> IsoskinResult<AvatarCanvas> {
    check_scale(scale)?;
    let image = match mode {
        RenderMode::Bust => sample(atlas, Face::HeadFront, scale)?.image,
        RenderMode::FullBody => full_body(atlas, scale)?,
    };
    Ok(AvatarCanvas { mode, scale, image })
}

/// [`compose`] with the mode given by name, as it arrives from configuration or commands.
pub fn compose_named(atlas: &SkinAtlas, mode: &str, scale: u32) -> IsoskinResult<AvatarCanvas> {
    compose(atlas, mode.parse()?, scale)
}

/// Decode texture bytes and render them in one step.
pub fn render_skin(
    bytes: &[u8],
    slim: bool,
    overlay: OverlayHint,
    mode: RenderMode,
    scale: u32,
) -> IsoskinResult<AvatarCanvas> {
    let atlas = SkinAtlas::parse(bytes, slim)?.with_overlay_hint(overlay);
    compose(&atlas, mode, scale)
}

fn full_body(atlas: &SkinAtlas, scale: u32) -> IsoskinResult<RgbaImage> {
    let (width, height) = geometry::canvas_size(scale);
    let mut canvas = RgbaImage::new(width, height);

    for face in PAINT_ORDER {
        let part = sample(atlas, face, scale)?;
        let projected = project(&part, Axis::of(face), scale)?;
        over_at(&mut canvas, &projected.image, projected.offset);
    }
    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/render/avatar.rs"]
mod tests;
