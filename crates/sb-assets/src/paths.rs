use md5::{Digest, Md5};
use sb_core::Dialect;

/// Obfuscates a logical asset path the way the game's packer does: the
/// file name becomes the MD5 hex digest of the whole logical path, while
/// the directory prefix stays readable.
pub fn hashed_asset_path(logical: &str) -> String {
    let digest = Md5::digest(logical.as_bytes());
    let hex = digest
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect::<String>();

    match logical.rfind('/') {
        Some(index) => format!("{}{}", &logical[..index + 1], hex),
        None => hex,
    }
}

/// Hashed location of a script file. Storage ids keep their dialect
/// extension (`intro.ks`, `main.sc`); on disk the packer stores the JSON
/// conversion, so the first occurrence of the extension is swapped for
/// `.json` before hashing.
pub fn script_asset_path(dialect: Dialect, storage: &str) -> String {
    let converted = storage.replacen(dialect.storage_extension(), ".json", 1);
    hashed_asset_path(&format!("script/{}", converted))
}

/// Hashed location of a voice-over cue.
pub fn voice_asset_path(cue: &str) -> String {
    hashed_asset_path(&format!("se/{}.m4a", cue))
}
