mod ks;
mod sc;
mod value;

use sb_core::{Dialect, Op, ScriptBookError};
use serde_json::Value as JsonValue;

/// Parses one script document into decoded ops. Malformed JSON and a
/// non-array document root are fatal; unrecognized instructions inside a
/// well-formed stream are silently dropped.
pub fn parse_script(dialect: Dialect, source: &str) -> Result<Vec<Op>, ScriptBookError> {
    let root = serde_json::from_str::<JsonValue>(source).map_err(|error| {
        ScriptBookError::new(
            "SCRIPT_PARSE",
            format!("Failed to parse script JSON: {}", error),
        )
    })?;

    let Some(instructions) = root.as_array() else {
        return Err(ScriptBookError::new(
            "SCRIPT_SHAPE",
            "Script document root must be an array of instructions.",
        ));
    };

    Ok(match dialect {
        Dialect::Ks => ks::decode_ops(instructions),
        Dialect::Sc => sc::decode_ops(instructions),
    })
}
