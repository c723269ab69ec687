use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by key-value stores
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a JSON object
    #[error("Store file {path} is corrupt: {message}")]
    Corrupt { path: PathBuf, message: String },

    #[error("Failed to serialize store: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("No cache directory available on this platform")]
    NoCacheDir,

    #[error("Store lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, StoreError>;
