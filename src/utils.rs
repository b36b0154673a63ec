//! Utility functions for steamdb-offline

use crate::error::{Result, SteamDbError};
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::Path;

/// Read a text file, treating "does not exist" as `None`.
///
/// Every other I/O failure (permissions, invalid UTF-8, ...) is an error.
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SteamDbError::read(path, e)),
    }
}

/// Format bytes in human-readable format (B, KB, MB, GB, TB)
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB"];
    const THRESHOLD: u64 = 1024;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD as f64 && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD as f64;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

/// Render a manifest `LastUpdated` value (unix seconds) as UTC time.
pub fn format_unix_timestamp(value: &str) -> Option<String> {
    let secs: i64 = value.trim().parse().ok()?;
    if secs <= 0 {
        return None;
    }
    DateTime::<Utc>::from_timestamp(secs, 0).map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
}

/// Convert file path to display-friendly string
pub fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
