//! Session-profile documents: which skin a player wears and which arm model it uses.
//!
//! ```json
//! { "id": "…", "name": "…", "properties": [ { "name": "textures", "value": "<base64 JSON>" } ] }
//! ```
//!
//! The `textures` value decodes to `{"textures": {"SKIN": {"url": "…", "metadata": {"model": "slim"}}}}`.
//! Only parsing happens here; downloading the URL is left to the caller.

use std::collections::HashMap;

use base64::Engine;

use crate::foundation::error::{IsoskinError, IsoskinResult};

/// The skin a profile points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkinProfile {
    pub id: String,
    pub name: String,
    pub skin_url: String,
    pub slim: bool,
}

#[derive(Debug, serde::Deserialize)]
struct ProfileDoc {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    properties: Vec<ProfileProperty>,
}

#[derive(Debug, serde::Deserialize)]
struct ProfileProperty {
    name: String,
    value: String,
}

#[derive(Debug, serde::Deserialize)]
struct TexturesDoc {
    #[serde(default)]
    textures: HashMap<String, TextureEntry>,
}

#[derive(Debug, serde::Deserialize)]
struct TextureEntry {
    url: String,
    #[serde(default)]
    metadata: HashMap<String, String>,
}

/// Parse a session-profile JSON document.
pub fn parse_profile(json: &str) -> IsoskinResult<SkinProfile> {
    let doc: ProfileDoc = serde_json::from_str(json)
        .map_err(|e| IsoskinError::validation(format!("parse profile JSON: {e}")))?;
    let textures = doc
        .properties
        .iter()
        .find(|p| p.name == "textures")
        .ok_or_else(|| {
            IsoskinError::validation(format!("profile '{}' has no textures property", doc.id))
        })?;
    let (skin_url, slim) = decode_textures(&textures.value)?;
    Ok(SkinProfile {
        id: doc.id,
        name: doc.name,
        skin_url,
        slim,
    })
}

/// Decode a base64 `textures` property value into `(skin url, slim)`.
pub fn decode_textures(value: &str) -> IsoskinResult<(String, bool)> {
    let raw = base64::engine::general_purpose::STANDARD
        .decode(value.trim())
        .map_err(|e| IsoskinError::validation(format!("textures property is not base64: {e}")))?;
    let doc: TexturesDoc = serde_json::from_slice(&raw)
        .map_err(|e| IsoskinError::validation(format!("parse textures JSON: {e}")))?;
    let skin = doc
        .textures
        .get("SKIN")
        .ok_or_else(|| IsoskinError::validation("textures property has no SKIN entry"))?;
    let slim = skin.metadata.get("model").is_some_and(|m| m == "slim");
    Ok((skin.url.clone(), slim))
}

#[cfg(test)]
#[path = "../../tests/unit/source/profile.rs"]
mod tests;
