//! Manifest Command Handler
//!
//! Handles the `manifest` subcommand: dump one parsed appmanifest.

use steamdb_offline::error::Result;
use steamdb_offline::manifest;
use std::path::Path;
use tracing::{info, warn};

pub fn execute(file: &Path) -> Result<()> {
    info!("Parsing manifest: {}", file.display());

    let record = manifest::parse(file)?;
    if record.is_empty() {
        warn!("No recognized fields in {}", file.display());
    }
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
