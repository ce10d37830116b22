//! Static region tables for the four atlas variants.
//!
//! A skin atlas packs every body part into fixed rectangles. Which rectangles exist depends on
//! the layout (legacy 64x32 vs modern 64x64) and the arm model (wide 4px vs slim 3px), so the
//! table is keyed by that pair and built once.

use std::{fmt, sync::LazyLock};

use crate::foundation::core::PixelRect;

/// Atlas layout version, derived from the texture height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtlasLayout {
    /// 64x32: no overlay layers, left limbs mirror the right ones.
    Legacy,
    /// 64x64: per-limb overlays and dedicated left-side art.
    Modern,
}

impl AtlasLayout {
    /// Atlas height for this layout; the width is always 64.
    pub fn height(self) -> u32 {
        match self {
            Self::Legacy => 32,
            Self::Modern => 64,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Modern => "modern",
        }
    }
}

/// Arm width variant, supplied by player metadata.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmModel {
    /// 4px wide arms.
    #[default]
    Wide,
    /// 3px wide arms.
    Slim,
}

impl ArmModel {
    pub fn from_slim(slim: bool) -> Self {
        if slim { Self::Slim } else { Self::Wide }
    }

    /// Arm width in atlas pixels.
    pub fn width(self) -> u32 {
        match self {
            Self::Wide => 4,
            Self::Slim => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Wide => "wide",
            Self::Slim => "slim",
        }
    }
}

/// Body group an overlay rectangle is declared for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyGroup {
    Head,
    Torso,
    RightArm,
    LeftArm,
    RightLeg,
    LeftLeg,
}

impl BodyGroup {
    pub const ALL: [Self; 6] = [
        Self::Head,
        Self::Torso,
        Self::RightArm,
        Self::LeftArm,
        Self::RightLeg,
        Self::LeftLeg,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Torso => "torso",
            Self::RightArm => "right_arm",
            Self::LeftArm => "left_arm",
            Self::RightLeg => "right_leg",
            Self::LeftLeg => "left_leg",
        }
    }
}

/// One visible face of the posed avatar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    HeadTop,
    HeadFront,
    HeadRight,
    ArmRightTop,
    ArmRightFront,
    ArmRightSide,
    ArmLeftTop,
    ArmLeftFront,
    LegRightFront,
    LegRightSide,
    LegLeftFront,
    TorsoFront,
}

impl Face {
    pub const COUNT: usize = 12;

    pub const ALL: [Self; Self::COUNT] = [
        Self::HeadTop,
        Self::HeadFront,
        Self::HeadRight,
        Self::ArmRightTop,
        Self::ArmRightFront,
        Self::ArmRightSide,
        Self::ArmLeftTop,
        Self::ArmLeftFront,
        Self::LegRightFront,
        Self::LegRightSide,
        Self::LegLeftFront,
        Self::TorsoFront,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::HeadTop => "head_top",
            Self::HeadFront => "head_front",
            Self::HeadRight => "head_right",
            Self::ArmRightTop => "arm_right_top",
            Self::ArmRightFront => "arm_right_front",
            Self::ArmRightSide => "arm_right_side",
            Self::ArmLeftTop => "arm_left_top",
            Self::ArmLeftFront => "arm_left_front",
            Self::LegRightFront => "leg_right_front",
            Self::LegRightSide => "leg_right_side",
            Self::LegLeftFront => "leg_left_front",
            Self::TorsoFront => "torso_front",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn group(self) -> BodyGroup {
        match self {
            Self::HeadTop | Self::HeadFront | Self::HeadRight => BodyGroup::Head,
            Self::ArmRightTop | Self::ArmRightFront | Self::ArmRightSide => BodyGroup::RightArm,
            Self::ArmLeftTop | Self::ArmLeftFront => BodyGroup::LeftArm,
            Self::LegRightFront | Self::LegRightSide => BodyGroup::RightLeg,
            Self::LegLeftFront => BodyGroup::LeftLeg,
            Self::TorsoFront => BodyGroup::Torso,
        }
    }

    /// Right-side counterpart used when a legacy atlas has no left-side art.
    pub fn mirror_source(self) -> Option<Self> {
        match self {
            Self::ArmLeftTop => Some(Self::ArmRightTop),
            Self::ArmLeftFront => Some(Self::ArmRightFront),
            Self::LegLeftFront => Some(Self::LegRightFront),
            _ => None,
        }
    }

    /// Whether the face width follows the arm model.
    pub fn is_arm_width(self) -> bool {
        matches!(
            self,
            Self::ArmRightTop | Self::ArmRightFront | Self::ArmLeftTop | Self::ArmLeftFront
        )
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Texture layer within the atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    Base,
    Overlay,
}

/// Fully qualified region: a face on a given layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegionName {
    pub face: Face,
    pub layer: Layer,
}

impl RegionName {
    pub fn base(face: Face) -> Self {
        Self {
            face,
            layer: Layer::Base,
        }
    }

    pub fn overlay(face: Face) -> Self {
        Self {
            face,
            layer: Layer::Overlay,
        }
    }
}

impl fmt::Display for RegionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.layer {
            Layer::Base => write!(f, "{}", self.face),
            Layer::Overlay => write!(f, "{}/overlay", self.face),
        }
    }
}

/// Where a region's pixels come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionSource {
    /// Crop this rectangle.
    Rect(PixelRect),
    /// Horizontally mirror the base region of another face.
    Mirror(Face),
}

/// Region rectangles for one (layout, arm model) combination.
#[derive(Clone, Debug)]
pub struct RegionTable {
    layout: AtlasLayout,
    arms: ArmModel,
    base: [RegionSource; Face::COUNT],
    overlay: Option<[PixelRect; Face::COUNT]>,
    groups: Option<[PixelRect; 6]>,
}

impl RegionTable {
    fn build(layout: AtlasLayout, arms: ArmModel) -> Self {
        let w = arms.width();
        let r = PixelRect::new;
        let legacy = layout == AtlasLayout::Legacy;

        let base = Face::ALL.map(|face| {
            if legacy && let Some(src) = face.mirror_source() {
                return RegionSource::Mirror(src);
            }
            RegionSource::Rect(match face {
                Face::HeadTop => r(8, 0, 8, 8),
                Face::HeadFront => r(8, 8, 8, 8),
                Face::HeadRight => r(0, 8, 8, 8),
                Face::ArmRightTop => r(44, 16, w, 4),
                Face::ArmRightFront => r(44, 20, w, 12),
                Face::ArmRightSide => r(40, 20, 4, 12),
                Face::ArmLeftTop => r(36, 48, w, 4),
                Face::ArmLeftFront => r(36, 52, w, 12),
                Face::LegRightFront => r(4, 20, 4, 12),
                Face::LegRightSide => r(0, 20, 4, 12),
                Face::LegLeftFront => r(20, 52, 4, 12),
                Face::TorsoFront => r(20, 20, 8, 12),
            })
        });

        let overlay = (!legacy).then(|| {
            Face::ALL.map(|face| match face {
                Face::HeadTop => r(40, 0, 8, 8),
                Face::HeadFront => r(40, 8, 8, 8),
                Face::HeadRight => r(32, 8, 8, 8),
                Face::ArmRightTop => r(44, 32, w, 4),
                Face::ArmRightFront => r(44, 36, w, 12),
                Face::ArmRightSide => r(40, 36, 4, 12),
                Face::ArmLeftTop => r(52, 48, w, 4),
                Face::ArmLeftFront => r(52, 52, w, 12),
                Face::LegRightFront => r(4, 36, 4, 12),
                Face::LegRightSide => r(0, 36, 4, 12),
                Face::LegLeftFront => r(4, 52, 4, 12),
                Face::TorsoFront => r(20, 36, 8, 12),
            })
        });

        let groups = (!legacy).then(|| {
            BodyGroup::ALL.map(|group| match group {
                BodyGroup::Head => r(32, 0, 32, 16),
                BodyGroup::Torso => r(16, 32, 24, 16),
                BodyGroup::RightArm => r(40, 32, 16, 16),
                BodyGroup::LeftArm => r(48, 48, 16, 16),
                BodyGroup::RightLeg => r(0, 32, 16, 16),
                BodyGroup::LeftLeg => r(0, 48, 16, 16),
            })
        });

        Self {
            layout,
            arms,
            base,
            overlay,
            groups,
        }
    }

    pub fn layout(&self) -> AtlasLayout {
        self.layout
    }

    pub fn arms(&self) -> ArmModel {
        self.arms
    }

    /// Resolve a region, or `None` if this variant does not define it.
    pub fn lookup(&self, name: RegionName) -> Option<RegionSource> {
        let idx = face_index(name.face);
        match name.layer {
            Layer::Base => Some(self.base[idx]),
            Layer::Overlay => self.overlay.map(|o| RegionSource::Rect(o[idx])),
        }
    }

    /// Detection rectangle for a body group's overlay, if the layout has overlays.
    pub fn overlay_group(&self, group: BodyGroup) -> Option<PixelRect> {
        let idx = BodyGroup::ALL.iter().position(|g| *g == group)?;
        self.groups.map(|g| g[idx])
    }

    /// Every rectangle the table can hand out.
    pub fn rects(&self) -> impl Iterator<Item = PixelRect> + '_ {
        let base = self.base.iter().filter_map(|s| match s {
            RegionSource::Rect(r) => Some(*r),
            RegionSource::Mirror(_) => None,
        });
        let overlay = self.overlay.iter().flatten().copied();
        let groups = self.groups.iter().flatten().copied();
        base.chain(overlay).chain(groups)
    }
}

fn face_index(face: Face) -> usize {
    face as usize
}

static TABLES: LazyLock<[RegionTable; 4]> = LazyLock::new(|| {
    [
        RegionTable::build(AtlasLayout::Legacy, ArmModel::Wide),
        RegionTable::build(AtlasLayout::Legacy, ArmModel::Slim),
        RegionTable::build(AtlasLayout::Modern, ArmModel::Wide),
        RegionTable::build(AtlasLayout::Modern, ArmModel::Slim),
    ]
});

/// Shared region table for a (layout, arm model) combination.
pub fn region_table(layout: AtlasLayout, arms: ArmModel) -> &'static RegionTable {
    let idx = match (layout, arms) {
        (AtlasLayout::Legacy, ArmModel::Wide) => 0,
        (AtlasLayout::Legacy, ArmModel::Slim) => 1,
        (AtlasLayout::Modern, ArmModel::Wide) => 2,
        (AtlasLayout::Modern, ArmModel::Slim) => 3,
    };
    &TABLES[idx]
}

#[cfg(test)]
#[path = "../../tests/unit/atlas/regions.rs"]
mod tests;
