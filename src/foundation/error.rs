/// Convenience result type used across isoskin.
pub type IsoskinResult<T> = Result<T, IsoskinError>;

/// Top-level error taxonomy used by the rendering APIs.
///
/// Every variant is terminal for the render call that produced it; nothing is retried
/// internally and no partial image is returned.
#[derive(thiserror::Error, Debug)]
pub enum IsoskinError {
    /// The texture bytes could not be decoded as an image.
    #[error("decode error: {0}")]
    Decode(#[from] image::ImageError),

    /// The decoded texture is not a 64x64 or 64x32 atlas.
    #[error("invalid dimensions: expected 64x64 or 64x32 atlas, got {width}x{height}")]
    InvalidDimensions {
        /// Decoded width in pixels.
        width: u32,
        /// Decoded height in pixels.
        height: u32,
    },

    /// The requested region has no rectangle for this layout/arm combination.
    #[error("unknown region: '{region}' does not exist in a {layout} atlas with {arms} arms")]
    UnknownRegion {
        /// Region name, e.g. `arm_left_front/overlay`.
        region: String,
        /// Layout name (`legacy` / `modern`).
        layout: &'static str,
        /// Arm model name (`wide` / `slim`).
        arms: &'static str,
    },

    /// A render mode string did not name a supported mode.
    #[error("unsupported mode: '{0}' (expected 'bust' or 'full_body')")]
    UnsupportedMode(String),

    /// The integer scale factor is outside `1..=MAX_SCALE`.
    #[error("invalid scale: {0} (expected 1..={max})", max = crate::foundation::core::MAX_SCALE)]
    InvalidScale(u32),

    /// Invalid caller-provided data (configuration, profile payloads, projector misuse).
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IsoskinError {
    /// Build a [`IsoskinError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`IsoskinError::UnsupportedMode`] value.
    pub fn unsupported_mode(mode: impl Into<String>) -> Self {
        Self::UnsupportedMode(mode.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
