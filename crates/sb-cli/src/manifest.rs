use std::fs;
use std::path::Path;

use sb_core::{Dialect, ScriptBookError};
use serde::{Deserialize, Serialize};

pub const MANIFEST_SCHEMA: &str = "scriptbook-game.v1";

/// One game's export definition: where its transcript goes and which
/// scripts it contains, in document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameManifest {
    pub schema_version: String,
    pub title: String,
    pub dialect: Dialect,
    pub output: String,
    #[serde(default)]
    pub scripts: Vec<String>,
}

pub fn load_game_manifest(path: &Path) -> Result<GameManifest, ScriptBookError> {
    let raw = fs::read_to_string(path).map_err(|error| {
        ScriptBookError::new(
            "MANIFEST_READ",
            format!("Failed to read \"{}\": {}", path.display(), error),
        )
    })?;

    let manifest: GameManifest = serde_json::from_str(&raw).map_err(|error| {
        ScriptBookError::new(
            "MANIFEST_INVALID",
            format!("Failed to parse \"{}\": {}", path.display(), error),
        )
    })?;

    if manifest.schema_version != MANIFEST_SCHEMA {
        return Err(ScriptBookError::new(
            "MANIFEST_SCHEMA",
            format!(
                "Unsupported manifest schema: {}",
                manifest.schema_version
            ),
        ));
    }

    Ok(manifest)
}
