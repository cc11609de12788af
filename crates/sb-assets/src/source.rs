use std::fs;
use std::path::Path;

use encoding_rs::UTF_16LE;
use sb_core::{Dialect, ScriptBookError};

use crate::paths::script_asset_path;

/// Reads and decodes one script's JSON source from its hashed location
/// under `root`. `ks` scripts are stored as UTF-8; `sc` scripts come from
/// a 16-bit little-endian engine and are decoded before parsing.
pub fn load_script_source(
    root: &Path,
    dialect: Dialect,
    storage: &str,
) -> Result<String, ScriptBookError> {
    let full_path = root.join(script_asset_path(dialect, storage));

    match dialect {
        Dialect::Ks => fs::read_to_string(&full_path).map_err(|error| {
            ScriptBookError::with_storage(
                "SCRIPT_READ",
                format!("Failed to read \"{}\": {}", full_path.display(), error),
                storage,
            )
        }),
        Dialect::Sc => {
            let bytes = fs::read(&full_path).map_err(|error| {
                ScriptBookError::with_storage(
                    "SCRIPT_READ",
                    format!("Failed to read \"{}\": {}", full_path.display(), error),
                    storage,
                )
            })?;
            let (text, _, _) = UTF_16LE.decode(&bytes);
            Ok(text.into_owned())
        }
    }
}
