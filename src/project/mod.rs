//! Isometric projection of sampled parts onto the full-body canvas.

/// Axis maps, layer sizes and part placements.
pub mod geometry;
/// Per-face warp into canvas space.
pub mod projector;
