pub mod manifest;

pub use manifest::{load_game_manifest, GameManifest, MANIFEST_SCHEMA};
