//! Installed Game Enumeration
//!
//! Walks every discovered library, parses its `appmanifest_*.acf` files and
//! turns the surviving records into `Entry` values.

use crate::assets::{self, AssetUrls};
use crate::error::{Result, SteamDbError};
use crate::library::{self, LibraryDirectory};
use crate::manifest::{self, ManifestField, ManifestRecord};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub const MANIFEST_PREFIX: &str = "appmanifest_";
pub const MANIFEST_EXTENSION: &str = ".acf";
pub const COMMON_DIR_NAME: &str = "common";

const REDISTRIBUTABLE_PREFIX: &str = "steamworks";

/// One installed game, ready for JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub steam_id: String,
    pub name: String,
    pub installdir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stateflags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_on_disk: Option<String>,
    pub install_path: PathBuf,
    pub launch_url: String,
    #[serde(flatten)]
    pub assets: AssetUrls,
}

impl Entry {
    /// Enrich a manifest record found in `library`.
    ///
    /// Fails with `MissingAppId` when the record has no usable appid, since
    /// every derived URL embeds it.
    pub fn from_record(record: &ManifestRecord, library: &Path, source: &Path) -> Result<Self> {
        let steam_id = record
            .get(ManifestField::AppId)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| SteamDbError::MissingAppId {
                path: source.to_path_buf(),
            })?
            .to_string();

        let installdir = record
            .get(ManifestField::InstallDir)
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            name: record.get(ManifestField::Name).unwrap_or_default().to_string(),
            last_updated: record.get(ManifestField::LastUpdated).map(str::to_string),
            stateflags: record.get(ManifestField::StateFlags).map(str::to_string),
            size_on_disk: record.get(ManifestField::SizeOnDisk).map(str::to_string),
            install_path: library.join(COMMON_DIR_NAME).join(&installdir),
            launch_url: assets::launch_url(&steam_id),
            assets: AssetUrls::for_app(&steam_id),
            installdir,
            steam_id,
        })
    }

    pub fn size_on_disk_bytes(&self) -> Option<u64> {
        self.size_on_disk.as_deref()?.trim().parse().ok()
    }
}

/// True for Steamworks redistributable packages (not real titles).
pub fn is_redistributable(name: &str) -> bool {
    name.get(..REDISTRIBUTABLE_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(REDISTRIBUTABLE_PREFIX))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Skip manifests that fail to parse instead of aborting the scan.
    pub skip_malformed: bool,
    /// Keep "Steamworks ..." redistributable packages in the output.
    pub include_redistributables: bool,
}

/// Enumerates games installed under a main `steamapps` directory.
#[derive(Debug, Clone)]
pub struct GameScanner {
    root: PathBuf,
    options: ScanOptions,
}

impl GameScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_options(root, ScanOptions::default())
    }

    pub fn with_options(root: impl Into<PathBuf>, options: ScanOptions) -> Self {
        Self {
            root: root.into(),
            options,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> ScanOptions {
        self.options
    }

    pub fn libraries(&self) -> Result<Vec<LibraryDirectory>> {
        library::discover(&self.root)
    }

    /// Scan all libraries. Order: library discovery order, then file name.
    pub fn get_games(&self) -> Result<Vec<Entry>> {
        info!("Scanning Steam libraries from {}", self.root.display());

        let mut games = Vec::new();
        for lib in self.libraries()? {
            games.extend(self.scan_library(&lib)?);
        }

        info!("Found {} installed game(s)", games.len());
        Ok(games)
    }

    /// Entries for the manifests directly inside one library directory.
    pub fn scan_library(&self, library: &Path) -> Result<Vec<Entry>> {
        let mut games = Vec::new();
        for path in manifest_paths(library)? {
            let record = match manifest::parse(&path) {
                Ok(record) => record,
                Err(e) if self.options.skip_malformed && e.is_parse_error() => {
                    warn!("Skipping malformed manifest: {}", e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            if record.is_empty() {
                debug!("Skipping {}: no recognized fields", path.display());
                continue;
            }

            let name = record.get(ManifestField::Name).unwrap_or_default();
            if !self.options.include_redistributables && is_redistributable(name) {
                debug!("Skipping redistributable: {}", name);
                continue;
            }

            match Entry::from_record(&record, library, &path) {
                Ok(entry) => {
                    debug!("Found game {} ({})", entry.name, entry.steam_id);
                    games.push(entry);
                }
                Err(e @ SteamDbError::MissingAppId { .. }) => warn!("Skipping: {}", e),
                Err(e) => return Err(e),
            }
        }
        Ok(games)
    }
}

/// `appmanifest_*.acf` files directly inside `library`, sorted by name.
///
/// A library directory that does not exist has no manifests.
pub fn manifest_paths(library: &Path) -> Result<Vec<PathBuf>> {
    if !library.is_dir() {
        warn!("Library folder not found: {}", library.display());
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(library)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| SteamDbError::read(library, e.into()))?;
        let name = entry.file_name().to_string_lossy();
        if name.starts_with(MANIFEST_PREFIX)
            && name.ends_with(MANIFEST_EXTENSION)
            && entry.path().is_file()
        {
            paths.push(entry.into_path());
        }
    }
    debug!("{} manifest(s) in {}", paths.len(), library.display());
    Ok(paths)
}

/// Convenience wrapper around `GameScanner::get_games`.
pub fn get_games(root: impl Into<PathBuf>) -> Result<Vec<Entry>> {
    GameScanner::new(root).get_games()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{INDEX_FILE_NAME, STEAMAPPS_DIR_NAME};
    use std::fs;
    use tempfile::TempDir;

    fn manifest(appid: &str, name: &str, installdir: Option<&str>) -> String {
        let mut body = format!("\"AppState\"\n{{\n\t\"appid\"\t\t\"{}\"\n\t\"name\"\t\t\"{}\"\n", appid, name);
        if let Some(dir) = installdir {
            body.push_str(&format!("\t\"installdir\"\t\t\"{}\"\n", dir));
        }
        body.push_str("}\n");
        body
    }

    fn write_manifest(dir: &Path, appid: &str, body: &str) {
        fs::write(dir.join(format!("appmanifest_{}.acf", appid)), body).unwrap();
    }

    #[test]
    fn test_entry_without_installdir() {
        let root = TempDir::new().unwrap();
        write_manifest(root.path(), "730", &manifest("730", "Counter-Strike 2", None));

        let games = get_games(root.path()).unwrap();
        assert_eq!(games.len(), 1);
        let game = &games[0];
        assert_eq!(game.steam_id, "730");
        assert_eq!(game.installdir, "");
        assert_eq!(game.install_path, root.path().join("common").join(""));
        assert_eq!(game.launch_url, "steam://run/730");
        assert_eq!(
            game.assets.logo,
            "https://cdn.steamstatic.com/steam/apps/730/logo.png"
        );
    }

    #[test]
    fn test_derived_fields_follow_appid() {
        let root = TempDir::new().unwrap();
        write_manifest(root.path(), "440", &manifest("440", "Team Fortress 2", Some("Team Fortress 2")));
        write_manifest(root.path(), "570", &manifest("570", "Dota 2", Some("dota 2 beta")));

        let games = get_games(root.path()).unwrap();
        assert_eq!(games.len(), 2);
        for game in &games {
            assert_eq!(game.assets, AssetUrls::for_app(&game.steam_id));
            assert_eq!(game.launch_url, assets::launch_url(&game.steam_id));
            assert_eq!(
                game.install_path,
                root.path().join("common").join(&game.installdir)
            );
        }
        assert_eq!(games[0].steam_id, "440");
        assert_eq!(games[1].steam_id, "570");
    }

    #[test]
    fn test_redistributables_are_filtered() {
        let root = TempDir::new().unwrap();
        write_manifest(root.path(), "228980", &manifest("228980", "Steamworks Common Redistributables", None));
        write_manifest(root.path(), "1", &manifest("1", "STEAMWORKS SDK", None));
        write_manifest(root.path(), "730", &manifest("730", "Counter-Strike 2", None));

        let games = get_games(root.path()).unwrap();
        let names: Vec<_> = games.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Counter-Strike 2"]);

        let all = GameScanner::with_options(
            root.path(),
            ScanOptions {
                include_redistributables: true,
                ..Default::default()
            },
        )
        .get_games()
        .unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_is_redistributable() {
        assert!(is_redistributable("Steamworks Common Redistributables"));
        assert!(is_redistributable("steamworks"));
        assert!(!is_redistributable("Steam"));
        assert!(!is_redistributable("My Steamworks Game"));
        assert!(!is_redistributable("ステームワークスゲーム"));
    }

    #[test]
    fn test_empty_and_appid_less_manifests_are_skipped() {
        let root = TempDir::new().unwrap();
        write_manifest(root.path(), "1", "\"AppState\"\n{\n\t\"buildid\"\t\t\"5\"\n}\n");
        write_manifest(root.path(), "2", "\"AppState\"\n{\n\t\"name\"\t\t\"No Id\"\n}\n");
        fs::write(root.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(root.path().join("common")).unwrap();

        assert!(get_games(root.path()).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_manifest_aborts_by_default() {
        let root = TempDir::new().unwrap();
        write_manifest(root.path(), "730", &manifest("730", "Counter-Strike 2", None));
        write_manifest(root.path(), "999", "\"AppState\"\n{\n\t\"appid\"\t\t\"999\n");

        let err = get_games(root.path()).unwrap_err();
        assert!(matches!(err, SteamDbError::ManifestParse { .. }));

        let games = GameScanner::with_options(
            root.path(),
            ScanOptions {
                skip_malformed: true,
                ..Default::default()
            },
        )
        .get_games()
        .unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].steam_id, "730");
    }

    #[test]
    fn test_damage_outside_recognized_keys_keeps_entry() {
        let head = "\"AppState\"\n{\n\t\"appid\"\t\t\"730\"\n\t\"name\"\t\t\"Counter-Strike 2\"\n";
        let bodies = [
            format!("{}\t\"buildid\"\t\t\"123\n}}\n", head),
            format!("{}\t\"Universe\"\n}}\n", head),
            head.to_string(),
        ];

        for body in bodies {
            let root = TempDir::new().unwrap();
            write_manifest(root.path(), "730", &body);

            let games = get_games(root.path()).unwrap();
            assert_eq!(games.len(), 1, "manifest:\n{}", body);
            assert_eq!(games[0].steam_id, "730");
            assert_eq!(games[0].name, "Counter-Strike 2");
        }
    }

    #[test]
    fn test_missing_root_yields_no_games() {
        let root = TempDir::new().unwrap();
        let games = get_games(root.path().join("does-not-exist")).unwrap();
        assert!(games.is_empty());
    }

    #[test]
    fn test_games_across_libraries() {
        let root = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        let other_apps = other.path().join(STEAMAPPS_DIR_NAME);
        fs::create_dir(&other_apps).unwrap();

        fs::write(
            root.path().join(INDEX_FILE_NAME),
            format!(
                "\"libraryfolders\"\n{{\n\t\"1\"\n\t{{\n\t\t\"path\"\t\t\"{}\"\n\t}}\n}}\n",
                other.path().display().to_string().replace('\\', "\\\\")
            ),
        )
        .unwrap();
        write_manifest(root.path(), "730", &manifest("730", "Counter-Strike 2", Some("cs2")));
        write_manifest(&other_apps, "440", &manifest("440", "Team Fortress 2", Some("tf2")));

        let games = get_games(root.path()).unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].install_path, root.path().join("common").join("cs2"));
        assert_eq!(games[1].install_path, other_apps.join("common").join("tf2"));
    }

    #[test]
    fn test_entry_json_shape() {
        let mut record = ManifestRecord::default();
        record.insert(ManifestField::AppId, "730");
        record.insert(ManifestField::Name, "Counter-Strike 2");
        record.insert(ManifestField::SizeOnDisk, "2048");
        let entry = Entry::from_record(&record, Path::new("/lib"), Path::new("/lib/m.acf")).unwrap();

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["steam_id"], "730");
        assert_eq!(json["size_on_disk"], "2048");
        assert_eq!(json["info_banner"], entry.assets.info_banner.as_str());
        assert!(json.get("last_updated").is_none());
        assert!(json.get("assets").is_none());
        assert_eq!(entry.size_on_disk_bytes(), Some(2048));
    }

    #[test]
    fn test_from_record_requires_appid() {
        let mut record = ManifestRecord::default();
        record.insert(ManifestField::Name, "Nameless");
        let err = Entry::from_record(&record, Path::new("/lib"), Path::new("/lib/m.acf")).unwrap_err();
        assert!(matches!(err, SteamDbError::MissingAppId { .. }));
    }
}
