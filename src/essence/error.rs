use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced while converting, verifying or fixing essence files.
///
/// Only [`EssenceError::NotFound`] is expected during a normal run; the I/O
/// variants cover an unreadable input or an output that cannot be written.
#[derive(Debug, Error)]
pub enum EssenceError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to list {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl EssenceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
