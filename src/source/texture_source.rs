use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    atlas::texture::{OverlayHint, SkinAtlas},
    foundation::error::{IsoskinError, IsoskinResult},
    render::avatar::{AvatarCanvas, RenderMode, compose},
};

/// Encoded skin bytes plus the upstream flags that travel with them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkinTexture {
    pub bytes: Vec<u8>,
    pub slim: bool,
    pub overlay: OverlayHint,
}

impl SkinTexture {
    pub fn new(bytes: Vec<u8>, slim: bool) -> Self {
        Self {
            bytes,
            slim,
            overlay: OverlayHint::Auto,
        }
    }

    pub fn into_atlas(self) -> IsoskinResult<SkinAtlas> {
        Ok(SkinAtlas::parse(&self.bytes, self.slim)?.with_overlay_hint(self.overlay))
    }
}

/// Where skins come from. The renderer never fetches anything itself.
pub trait TextureSource: Send + Sync {
    fn fetch(&self, identity: &str) -> IsoskinResult<SkinTexture>;
}

/// Skins stored as `<root>/<identity>.png`.
///
/// An optional `<identity>.json` next to the PNG carries `{"slim": bool, "overlay": ...}`.
/// Without it, an identity ending in `_slim` selects slim arms.
#[derive(Clone, Debug)]
pub struct DirTextureSource {
    root: PathBuf,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SkinMeta {
    slim: Option<bool>,
    overlay: OverlayHint,
}

impl DirTextureSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Identities with a `.png` file directly under the root, sorted.
    pub fn identities(&self) -> IsoskinResult<Vec<String>> {
        let entries = std::fs::read_dir(&self.root)
            .with_context(|| format!("read skin dir '{}'", self.root.display()))?;
        let mut out = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("read skin dir '{}'", self.root.display()))?
                .path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("png") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                out.push(stem.to_string());
            }
        }
        out.sort();
        Ok(out)
    }

    fn read_meta(&self, identity: &str) -> IsoskinResult<SkinMeta> {
        let path = self.root.join(format!("{identity}.json"));
        if !path.is_file() {
            return Ok(SkinMeta::default());
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("read skin metadata '{}'", path.display()))?;
        serde_json::from_str(&text).map_err(|e| {
            IsoskinError::validation(format!("parse skin metadata '{}': {e}", path.display()))
        })
    }
}

impl TextureSource for DirTextureSource {
    fn fetch(&self, identity: &str) -> IsoskinResult<SkinTexture> {
        check_identity(identity)?;
        let path = self.root.join(format!("{identity}.png"));
        let bytes =
            std::fs::read(&path).with_context(|| format!("read skin '{}'", path.display()))?;
        let meta = self.read_meta(identity)?;
        Ok(SkinTexture {
            bytes,
            slim: meta.slim.unwrap_or_else(|| identity.ends_with("_slim")),
            overlay: meta.overlay,
        })
    }
}

/// Skins held in memory, keyed by identity.
#[derive(Clone, Debug, Default)]
pub struct MemoryTextureSource {
    skins: HashMap<String, SkinTexture>,
}

impl MemoryTextureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, identity: impl Into<String>, texture: SkinTexture) {
        self.skins.insert(identity.into(), texture);
    }

    pub fn len(&self) -> usize {
        self.skins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skins.is_empty()
    }
}

impl TextureSource for MemoryTextureSource {
    fn fetch(&self, identity: &str) -> IsoskinResult<SkinTexture> {
        self.skins
            .get(identity)
            .cloned()
            .ok_or_else(|| IsoskinError::validation(format!("no skin for identity '{identity}'")))
    }
}

/// Fetch a skin and render it.
pub fn render_identity(
    source: &dyn TextureSource,
    identity: &str,
    mode: RenderMode,
    scale: u32,
) -> IsoskinResult<AvatarCanvas> {
    let atlas = source.fetch(identity)?.into_atlas()?;
    compose(&atlas, mode, scale)
}

fn check_identity(identity: &str) -> IsoskinResult<()> {
    if identity.is_empty()
        || identity.contains(['/', '\\', '\0'])
        || identity.contains("..")
    {
        return Err(IsoskinError::validation(format!(
            "invalid skin identity '{identity}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/source/texture_source.rs"]
mod tests;
