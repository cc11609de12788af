use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use sb_api::{export_game, ExportOptions};
use sb_assets::script_asset_path;
use sb_cli::load_game_manifest;
use sb_core::ScriptBookError;
use walkdir::WalkDir;

#[derive(Debug, Parser)]
#[command(name = "scriptbook")]
#[command(about = "Render visual-novel script dumps as browsable HTML transcripts")]
struct Cli {
    #[command(subcommand)]
    command: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Export one game's transcript document from its manifest.
    Export(ExportArgs),
    /// Check which manifest scripts exist under the asset root.
    Probe(ProbeArgs),
}

#[derive(Debug, Args)]
struct ExportArgs {
    #[arg(long = "manifest")]
    manifest: String,
    #[arg(long = "asset-root", default_value = ".")]
    asset_root: String,
    /// Overrides the manifest's output path.
    #[arg(long = "output")]
    output: Option<String>,
}

#[derive(Debug, Args)]
struct ProbeArgs {
    #[arg(long = "manifest")]
    manifest: String,
    #[arg(long = "asset-root", default_value = ".")]
    asset_root: String,
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    };

    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32, ScriptBookError> {
    match cli.command {
        Mode::Export(args) => run_export(args),
        Mode::Probe(args) => run_probe(args),
    }
}

fn run_export(args: ExportArgs) -> Result<i32, ScriptBookError> {
    let manifest = load_game_manifest(Path::new(&args.manifest))?;
    let output = PathBuf::from(args.output.unwrap_or(manifest.output));

    export_game(
        manifest.dialect,
        &ExportOptions {
            asset_root: PathBuf::from(args.asset_root),
            output: output.clone(),
            title: manifest.title,
            scripts: manifest.scripts,
        },
    )?;

    println!("exported: {}", output.display());
    Ok(0)
}

fn run_probe(args: ProbeArgs) -> Result<i32, ScriptBookError> {
    let manifest = load_game_manifest(Path::new(&args.manifest))?;
    let asset_root = PathBuf::from(args.asset_root);
    let present = scan_asset_files(&asset_root)?;

    let mut missing = 0usize;
    for storage in &manifest.scripts {
        let expected = script_asset_path(manifest.dialect, storage);
        if present.contains(&expected) {
            println!("FOUND {} ({})", storage, expected);
        } else {
            println!("MISSING {} ({})", storage, expected);
            missing += 1;
        }
    }

    println!(
        "probed {} scripts, {} missing",
        manifest.scripts.len(),
        missing
    );
    Ok(if missing == 0 { 0 } else { 1 })
}

fn scan_asset_files(asset_root: &Path) -> Result<BTreeSet<String>, ScriptBookError> {
    if !asset_root.is_dir() {
        return Err(ScriptBookError::new(
            "ASSET_ROOT_NOT_DIR",
            format!("asset root is not a directory: {}", asset_root.display()),
        ));
    }

    let mut files = BTreeSet::new();
    for entry in WalkDir::new(asset_root)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(asset_root)
            .map_err(|error| ScriptBookError::new("ASSET_ROOT_SCAN", error.to_string()))?
            .to_string_lossy()
            .replace('\\', "/");
        files.insert(relative);
    }

    Ok(files)
}

fn emit_error(error: ScriptBookError) -> i32 {
    eprintln!("error[{}]: {}", error.code, error.message);
    if let Some(storage) = error.storage {
        eprintln!("  while processing: {}", storage);
    }
    1
}
