pub mod paths;
pub mod source;

pub use paths::{hashed_asset_path, script_asset_path, voice_asset_path};
pub use source::load_script_source;
