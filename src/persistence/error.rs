use std::fmt;
use std::path::PathBuf;

use crate::sim::SnapshotError;

/// Failure reading or writing a save file
#[derive(Debug)]
pub enum PersistError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// File parsed but cannot be restored into a session
    Invalid {
        path: PathBuf,
        source: SnapshotError,
    },
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "I/O error on {}: {source}", path.display()),
            Self::Parse { path, source } => {
                write!(f, "malformed save file {}: {source}", path.display())
            }
            Self::Invalid { path, source } => {
                write!(f, "unusable save file {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid { source, .. } => Some(source),
        }
    }
}
