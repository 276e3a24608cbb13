//! Error types for the Rendezvous binary.
//!
//! [`AppError`] wraps every failure mode of startup, load and save so that
//! `main` can propagate with `?`.

use rendezvous_model::ModelError;
use rendezvous_storage::StorageError;

use crate::config::ConfigError;

/// Top-level error for the Rendezvous binary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// Reading or writing the data file failed.
    #[error("storage error: {source}")]
    Storage {
        /// The underlying storage error.
        #[from]
        source: StorageError,
    },

    /// The data file decoded but does not form a consistent planner.
    #[error("data error: {source}")]
    Model {
        /// The underlying model error.
        #[from]
        source: ModelError,
    },
}
