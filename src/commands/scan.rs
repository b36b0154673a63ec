//! Scan Command Handler
//!
//! Handles the `scan` subcommand: enumerate games, write the JSON file,
//! print the listing.

use steamdb_offline::config::Config;
use steamdb_offline::display;
use steamdb_offline::error::{Result, SteamDbError};
use steamdb_offline::games::{Entry, GameScanner, ScanOptions};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn execute(
    config: &Config,
    output: Option<PathBuf>,
    detailed: bool,
    options: ScanOptions,
) -> Result<()> {
    let root = config.steamapps_or_default()?;
    let output = output.unwrap_or_else(|| config.output_or_default());
    let defaults = config.scan_options();
    let options = ScanOptions {
        skip_malformed: options.skip_malformed || defaults.skip_malformed,
        include_redistributables: options.include_redistributables
            || defaults.include_redistributables,
    };

    info!("Starting scan: {} -> {}", root.display(), output.display());

    let games = GameScanner::with_options(root, options).get_games()?;
    write_json(&output, &games)?;
    info!("Wrote {} game(s) to {}", games.len(), output.display());

    display::display_games(&output, &games, detailed)
        .map_err(|e| SteamDbError::write("<stdout>", e))
}

/// Pretty JSON array, 4-space indent, non-ASCII kept as-is.
pub fn to_json(games: &[Entry]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    games.serialize(&mut ser)?;
    Ok(buf)
}

fn write_json(path: &Path, games: &[Entry]) -> Result<()> {
    let json = to_json(games)?;
    std::fs::write(path, json).map_err(|e| SteamDbError::write(path, e))
}
