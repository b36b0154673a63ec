//! Steam Library Discovery
//!
//! Reads `libraryfolders.vdf` from the main `steamapps` directory and
//! resolves every additional library it references. Two layouts exist:
//!
//! ```text
//! "libraryfolders"                 "LibraryFolders"
//! {                                {
//!     "0"                              "TimeNextStatsReport"  "..."
//!     {                                "1"  "D:\\Games"
//!         "path"  "D:\\Games"      }
//!         "apps" { "730" "..." }
//!     }
//! }
//! ```
//!
//! Both are read from the same parse tree: `path` leaves anywhere, plus
//! numeric keys with string values directly under the root block.
//! Damaged entries are logged and skipped; the index never fails to parse.

use crate::error::Result;
use crate::utils::{self, read_optional};
use crate::vdf::{self, VdfObject};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const INDEX_FILE_NAME: &str = "libraryfolders.vdf";
pub const STEAMAPPS_DIR_NAME: &str = "steamapps";

/// A `steamapps` directory that may hold manifests and a `common` folder.
pub type LibraryDirectory = PathBuf;

/// Raw library root paths listed in index text, unescaped and trimmed.
pub fn library_paths_from_index(index: &VdfObject) -> Vec<String> {
    let mut raw: Vec<String> = index
        .find_all_strings("path")
        .into_iter()
        .map(str::to_string)
        .collect();

    for (_, block) in index.iter() {
        let Some(block) = block.as_object() else {
            continue;
        };
        for (key, value) in block.iter() {
            if let Some(path) = value.as_str() {
                if !key.is_empty() && key.chars().all(|c| c.is_ascii_digit()) {
                    raw.push(path.to_string());
                }
            }
        }
    }

    raw.into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Discover the library directories reachable from `root`.
///
/// `root` always comes first. Referenced libraries follow in index order,
/// kept only if their `steamapps` directory exists and is not a duplicate.
pub fn discover(root: &Path) -> Result<Vec<LibraryDirectory>> {
    let mut libraries = vec![root.to_path_buf()];
    let mut seen = vec![dedup_key(root)];

    let index_path = root.join(INDEX_FILE_NAME);
    let Some(text) = read_optional(&index_path)? else {
        debug!("No {} in {}, using main library only", INDEX_FILE_NAME, root.display());
        return Ok(libraries);
    };

    let index = vdf::parse_lenient(&text);
    for e in &index.errors {
        warn!("Ignoring malformed entry in {}: {}", index_path.display(), e);
    }

    for raw in library_paths_from_index(&index.root) {
        let candidate = PathBuf::from(&raw).join(STEAMAPPS_DIR_NAME);
        if !candidate.is_dir() {
            debug!("Skipping library {}: no {} directory", raw, STEAMAPPS_DIR_NAME);
            continue;
        }
        let key = dedup_key(&candidate);
        if seen.contains(&key) {
            continue;
        }
        debug!("Found library: {}", utils::path_to_string(&candidate));
        seen.push(key);
        libraries.push(candidate);
    }

    info!("Discovered {} Steam library folder(s)", libraries.len());
    Ok(libraries)
}

fn dedup_key(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
