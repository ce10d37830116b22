use std::{fs::File, io::BufReader, path::Path};

use crate::{
    atlas::texture::OverlayHint,
    foundation::{
        core::check_scale,
        error::{IsoskinError, IsoskinResult},
    },
    render::{avatar::RenderMode, batch::BatchOpts},
};

/// Default pixels per skin texel.
pub const DEFAULT_SCALE: u32 = 6;

/// Render settings as read from a JSON file; command-line flags are layered on top.
///
/// ```json
/// { "mode": "full_body", "scale": 6, "slim": false, "overlay": "auto", "threads": 4 }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Kept as text so unknown names surface as `UnsupportedMode`, not as a parse error.
    pub mode: String,
    pub scale: u32,
    pub slim: bool,
    pub overlay: OverlayHint,
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::default().name().to_string(),
            scale: DEFAULT_SCALE,
            slim: false,
            overlay: OverlayHint::Auto,
            threads: None,
        }
    }
}

impl RenderConfig {
    pub fn from_reader<R: std::io::Read>(r: R) -> IsoskinResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| IsoskinError::validation(format!("parse render config JSON: {e}")))
    }

    pub fn from_json_str(s: &str) -> IsoskinResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    pub fn from_path(path: impl AsRef<Path>) -> IsoskinResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            IsoskinError::validation(format!("open render config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn render_mode(&self) -> IsoskinResult<RenderMode> {
        self.mode.parse()
    }

    pub fn batch_opts(&self) -> BatchOpts {
        BatchOpts {
            threads: self.threads,
        }
    }

    pub fn validate(&self) -> IsoskinResult<()> {
        self.render_mode()?;
        check_scale(self.scale)?;
        if self.threads == Some(0) {
            return Err(IsoskinError::validation("'threads' must be >= 1 when set"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
