/// Shared geometry and pixel primitives.
pub mod core;
/// Crate-wide error type.
pub mod error;
