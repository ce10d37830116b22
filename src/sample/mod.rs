//! Region sampling: crop, mirror, upscale and overlay merge.

/// Small RGBA8 buffer helpers.
pub mod pixels;
/// Named-region sampling into upscaled parts.
pub mod sampler;
