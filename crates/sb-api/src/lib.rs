use std::path::PathBuf;

use sb_assets::{load_script_source, script_asset_path};
use sb_core::{Dialect, ScriptBookError};
use sb_parser::parse_script;
use sb_render::{render_table, write_document_file, Section};

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub asset_root: PathBuf,
    pub output: PathBuf,
    pub title: String,
    /// Storage ids in document order.
    pub scripts: Vec<String>,
}

pub fn export_ks_game(options: &ExportOptions) -> Result<(), ScriptBookError> {
    export_game(Dialect::Ks, options)
}

pub fn export_sc_game(options: &ExportOptions) -> Result<(), ScriptBookError> {
    export_game(Dialect::Sc, options)
}

/// Full pipeline for one game: each listed script is read from its hashed
/// location, decoded, rendered, and streamed into the output document, one
/// script at a time in list order. The first failure aborts the run.
pub fn export_game(dialect: Dialect, options: &ExportOptions) -> Result<(), ScriptBookError> {
    write_document_file(
        &options.output,
        &options.title,
        &options.scripts,
        |storage| {
            let source = load_script_source(&options.asset_root, dialect, storage)?;
            let ops =
                parse_script(dialect, &source).map_err(|error| error.in_storage(storage))?;
            let table = render_table(&ops, storage)?;
            Ok(Section {
                located: script_asset_path(dialect, storage),
                table,
            })
        },
    )
}
