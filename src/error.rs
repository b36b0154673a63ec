use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SteamDbError>;

#[derive(Error, Debug)]
pub enum SteamDbError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Manifest parse error in {} (line {line}): {message}", path.display())]
    ManifestParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Manifest {} has no appid", path.display())]
    MissingAppId { path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl SteamDbError {
    pub fn read<P: AsRef<Path>>(path: P, source: std::io::Error) -> Self {
        Self::Read {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn write<P: AsRef<Path>>(path: P, source: std::io::Error) -> Self {
        Self::Write {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Config(msg.into())
    }

    /// True for malformed manifest text, as opposed to I/O failures.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ManifestParse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = SteamDbError::config("bad value");
        assert!(matches!(err, SteamDbError::Config(_)));
        assert_eq!(err.to_string(), "Configuration error: bad value");
    }

    #[test]
    fn test_parse_error_display() {
        let err = SteamDbError::ManifestParse {
            path: PathBuf::from("appmanifest_730.acf"),
            line: 4,
            message: "unterminated string".to_string(),
        };
        assert!(err.is_parse_error());
        assert_eq!(
            err.to_string(),
            "Manifest parse error in appmanifest_730.acf (line 4): unterminated string"
        );
    }

    #[test]
    fn test_read_error_is_not_parse_error() {
        let err = SteamDbError::read(
            "libraryfolders.vdf",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_parse_error());
        assert!(err.to_string().starts_with("Failed to read libraryfolders.vdf"));
    }
}
