//! Skin atlases: decoding, layout detection and the named region table.

/// Face, body-group and region-table definitions per layout and arm model.
pub mod regions;
/// Decoded atlas plus its layout, arm model and overlay hint.
pub mod texture;
