//! Avatar composition and batch rendering.

/// Bust and full-body composition.
pub mod avatar;
/// Parallel rendering of independent jobs.
pub mod batch;
