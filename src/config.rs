//! Configuration
//!
//! Settings come from, in order of precedence: command-line flags, an
//! optional JSON config file, built-in defaults.
//!
//! ```json
//! {
//!     "steamapps": "D:\\Steam\\steamapps",
//!     "output": "games.json",
//!     "skip_malformed": true
//! }
//! ```

use crate::error::{Result, SteamDbError};
use crate::games::ScanOptions;
use crate::library::STEAMAPPS_DIR_NAME;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_OUTPUT_FILE: &str = "my_steam_local_games_full.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Main `steamapps` directory.
    pub steamapps: Option<PathBuf>,
    /// JSON output file for `scan`.
    pub output: Option<PathBuf>,
    pub skip_malformed: bool,
    pub include_redistributables: bool,
}

impl Config {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| SteamDbError::config(format!("invalid config: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading config from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|e| SteamDbError::read(path, e))?;
        Self::from_json(&text)
    }

    /// Load `path` if given, otherwise use defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn steamapps_or_default(&self) -> Result<PathBuf> {
        match &self.steamapps {
            Some(p) => Ok(p.clone()),
            None => default_steamapps_dir(),
        }
    }

    pub fn output_or_default(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE))
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            skip_malformed: self.skip_malformed,
            include_redistributables: self.include_redistributables,
        }
    }
}

/// Conventional `steamapps` location for the current platform.
pub fn default_steamapps_dir() -> Result<PathBuf> {
    if cfg!(windows) {
        return Ok(PathBuf::from(r"C:\Program Files (x86)\Steam").join(STEAMAPPS_DIR_NAME));
    }

    let home = dirs::home_dir()
        .ok_or_else(|| SteamDbError::config("could not determine home directory"))?;
    Ok(default_steamapps_under(&home))
}

fn default_steamapps_under(home: &Path) -> PathBuf {
    if cfg!(target_os = "macos") {
        return home
            .join("Library/Application Support/Steam")
            .join(STEAMAPPS_DIR_NAME);
    }

    let xdg = home.join(".local/share/Steam").join(STEAMAPPS_DIR_NAME);
    let legacy = home.join(".steam/steam").join(STEAMAPPS_DIR_NAME);
    if !xdg.is_dir() && legacy.is_dir() {
        legacy
    } else {
        xdg
    }
}
