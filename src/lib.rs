//! isoskin turns a character skin atlas into an isometric avatar image.
//!
//! A skin is a 64x64 (modern) or 64x32 (legacy) RGBA texture that packs every face of a blocky
//! humanoid into fixed rectangles. Rendering runs in four stages:
//!
//! 1. **Decode**: bytes -> [`SkinAtlas`] (layout and arm model fixed here)
//! 2. **Sample**: named region -> upscaled [`RenderedPart`], overlay merged where authored
//! 3. **Project**: part -> [`ProjectedFace`] warped along one of three isometric axes
//! 4. **Compose**: faces pasted back-to-front -> [`AvatarCanvas`]
//!
//! Everything is CPU-only, nearest-neighbour and deterministic: the same atlas, mode and
//! scale always produce the same pixels. The library does no network IO and installs no
//! tracing subscriber.
#![forbid(unsafe_code)]

pub mod atlas;
pub mod config;
pub mod effects;
pub mod foundation;
pub mod project;
pub mod render;
pub mod sample;
pub mod source;

pub use atlas::regions::{
    ArmModel, AtlasLayout, BodyGroup, Face, Layer, RegionName, RegionSource, RegionTable,
    region_table,
};
pub use atlas::texture::{ATLAS_WIDTH, OverlayHint, SkinAtlas};
pub use config::{DEFAULT_SCALE, RenderConfig};
pub use effects::composite::{over, over_at};
pub use foundation::core::{MAX_SCALE, Offset, PixelRect, Rgba8, TRANSPARENT, check_scale};
pub use foundation::error::{IsoskinError, IsoskinResult};
pub use project::geometry::{Axis, AxisFrame, axis_frame, canvas_size, placement};
pub use project::projector::{ProjectedFace, project};
pub use render::avatar::{
    AvatarCanvas, PAINT_ORDER, RenderMode, compose, compose_named, render_skin,
};
pub use render::batch::{BatchJob, BatchOpts, BatchOutput, BatchStats, render_batch};
pub use sample::sampler::{RenderedPart, overlay_present, sample, sample_layer, sample_named};
pub use source::profile::{SkinProfile, decode_textures, parse_profile};
pub use source::texture_source::{
    DirTextureSource, MemoryTextureSource, SkinTexture, TextureSource, render_identity,
};
