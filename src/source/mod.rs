//! Where skins come from: texture sources and session profiles.

/// Session-profile parsing (skin URL and arm model).
pub mod profile;
/// Texture source trait plus directory and in-memory sources.
pub mod texture_source;
