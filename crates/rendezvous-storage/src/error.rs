//! Error types for the storage layer.
//!
//! Both variants carry the path that was being read or written so the
//! binary can report which file is at fault.

use std::path::PathBuf;

/// Errors that can occur while reading or writing a planner data file.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The file or its directory could not be read, written or renamed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File the operation targeted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file content is not a valid planner snapshot, or the snapshot
    /// could not be encoded.
    #[error("serialization error in {path}: {source}")]
    Serialization {
        /// File the operation targeted.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}
