//! Libraries Command Handler
//!
//! Handles the `libraries` subcommand for listing library folders.

use steamdb_offline::config::Config;
use steamdb_offline::display;
use steamdb_offline::error::{Result, SteamDbError};
use steamdb_offline::library;
use tracing::info;

pub fn execute(config: &Config) -> Result<()> {
    let root = config.steamapps_or_default()?;
    info!("Discovering libraries from {}", root.display());

    let libraries = library::discover(&root)?;
    display::display_libraries(&libraries).map_err(|e| SteamDbError::write("<stdout>", e))
}
