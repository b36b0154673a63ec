//! App Manifest Parsing
//!
//! Extracts the handful of fields we care about from `appmanifest_*.acf`.
//!
//! Damage elsewhere in the file is logged and ignored; only a broken entry
//! for one of the recognized keys makes the manifest unreadable.

use crate::error::{Result, SteamDbError};
use crate::utils::read_optional;
use crate::vdf::{self, VdfObject};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Manifest keys we extract, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifestField {
    #[serde(rename = "steam_id")]
    AppId,
    Name,
    #[serde(rename = "installdir")]
    InstallDir,
    LastUpdated,
    #[serde(rename = "stateflags")]
    StateFlags,
    SizeOnDisk,
}

impl ManifestField {
    pub const ALL: [ManifestField; 6] = [
        ManifestField::AppId,
        ManifestField::Name,
        ManifestField::InstallDir,
        ManifestField::LastUpdated,
        ManifestField::StateFlags,
        ManifestField::SizeOnDisk,
    ];

    /// Key as written in the manifest file.
    pub fn manifest_key(self) -> &'static str {
        match self {
            ManifestField::AppId => "appid",
            ManifestField::Name => "name",
            ManifestField::InstallDir => "installdir",
            ManifestField::LastUpdated => "LastUpdated",
            ManifestField::StateFlags => "StateFlags",
            ManifestField::SizeOnDisk => "SizeOnDisk",
        }
    }

    /// Name used in records and JSON output.
    pub fn record_name(self) -> &'static str {
        match self {
            ManifestField::AppId => "steam_id",
            ManifestField::Name => "name",
            ManifestField::InstallDir => "installdir",
            ManifestField::LastUpdated => "last_updated",
            ManifestField::StateFlags => "stateflags",
            ManifestField::SizeOnDisk => "size_on_disk",
        }
    }

    /// Exact, case-sensitive match on the manifest key.
    pub fn from_manifest_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.manifest_key() == key)
    }
}

/// Recognized fields present in one manifest. Absent fields are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ManifestRecord {
    fields: BTreeMap<ManifestField, String>,
}

impl ManifestRecord {
    pub fn get(&self, field: ManifestField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn insert(&mut self, field: ManifestField, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    pub fn contains(&self, field: ManifestField) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ManifestField, &str)> {
        self.fields.iter().map(|(f, v)| (*f, v.as_str()))
    }

    /// Collect recognized keys from top-level leaves and from the direct
    /// children of top-level blocks (the `AppState` block).
    pub fn from_vdf(doc: &VdfObject) -> Self {
        let mut record = Self::default();
        for (key, value) in doc.iter() {
            if let Some(s) = value.as_str() {
                record.take(key, s);
            } else if let Some(block) = value.as_object() {
                for (k, v) in block.iter() {
                    if let Some(s) = v.as_str() {
                        record.take(k, s);
                    }
                }
            }
        }
        record
    }

    fn take(&mut self, key: &str, value: &str) {
        if let Some(field) = ManifestField::from_manifest_key(key) {
            self.insert(field, value);
        }
    }
}

/// Parse one manifest. A missing file yields an empty record.
pub fn parse(path: &Path) -> Result<ManifestRecord> {
    let Some(text) = read_optional(path)? else {
        debug!("Manifest {} does not exist", path.display());
        return Ok(ManifestRecord::default());
    };

    let doc = vdf::parse_lenient(&text);
    if let Some(e) = doc
        .errors
        .iter()
        .find(|e| e.key.as_deref().and_then(ManifestField::from_manifest_key).is_some())
    {
        return Err(SteamDbError::ManifestParse {
            path: path.to_path_buf(),
            line: e.line,
            message: e.message.clone(),
        });
    }
    for e in &doc.errors {
        warn!("Ignoring malformed entry in {}: {}", path.display(), e);
    }

    let record = ManifestRecord::from_vdf(&doc.root);
    debug!("Parsed {}: {} field(s)", path.display(), record.len());
    Ok(record)
}
