//! Error kinds for the desktop file store

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the file store while reading or writing desktop entries
#[derive(Debug, Error)]
pub enum StoreError {
    /// A desktop entry file could not be read or written
    #[error("failed to {message} {}", path.display())]
    Io {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A desktop entry file contains a line that is not a comment, group
    /// header, or key/value pair
    #[error("malformed desktop entry {} at line {line}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

impl StoreError {
    pub(crate) fn io(message: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            message: message.into(),
            path: path.into(),
            source,
        }
    }
}
