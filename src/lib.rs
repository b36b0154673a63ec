//! steamdb-offline Library
//!
//! Enumerates locally installed Steam games without network access by
//! reading `libraryfolders.vdf` and `appmanifest_*.acf` files.
//!
//! ```no_run
//! use steamdb_offline::GameScanner;
//!
//! let games = GameScanner::new(r"C:\Program Files (x86)\Steam\steamapps").get_games()?;
//! for game in &games {
//!     println!("{} {}", game.name, game.install_path.display());
//! }
//! # Ok::<(), steamdb_offline::SteamDbError>(())
//! ```

pub mod assets;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod games;
pub mod library;
pub mod logger;
pub mod manifest;
pub mod utils;
pub mod vdf;

// Re-export key types for easier use
pub use assets::AssetUrls;
pub use config::Config;
pub use error::{Result, SteamDbError};
pub use games::{get_games, Entry, GameScanner, ScanOptions};
pub use library::{discover, LibraryDirectory};
pub use manifest::{ManifestField, ManifestRecord};
