//! Planner snapshots stored as a single pretty-printed JSON file.
//!
//! Writes go to a sibling temporary file that is then renamed over the
//! target, so a crash mid-save leaves either the old file or the new one,
//! never a truncated mix.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use rendezvous_model::PlannerSnapshot;
use tracing::{debug, info, warn};

use crate::error::StorageError;

/// Suffix appended to the file name for the in-progress write.
const TEMP_SUFFIX: &str = "tmp";

/// Reads and writes one planner snapshot at a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPlannerStorage {
    path: PathBuf,
}

impl JsonPlannerStorage {
    /// Create a store for the file at `path`. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The data file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot, or `None` if the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the file exists but cannot be read,
    /// or [`StorageError::Serialization`] if its content is not a valid
    /// snapshot (including any field that fails validation).
    pub fn read(&self) -> Result<Option<PlannerSnapshot>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Data file not found");
                return Ok(None);
            }
            Err(source) => return Err(self.io_error(source)),
        };
        let snapshot: PlannerSnapshot =
            serde_json::from_str(&raw).map_err(|source| StorageError::Serialization {
                path: self.path.clone(),
                source,
            })?;
        info!(
            path = %self.path.display(),
            entities = snapshot.entity_count(),
            "Read data file"
        );
        Ok(Some(snapshot))
    }

    /// Write `snapshot`, replacing any existing file. Parent directories
    /// are created as needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if a directory, the temporary file or
    /// the final rename fails, or [`StorageError::Serialization`] if the
    /// snapshot cannot be encoded.
    pub fn save(&self, snapshot: &PlannerSnapshot) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let json =
            serde_json::to_string_pretty(snapshot).map_err(|source| StorageError::Serialization {
                path: self.path.clone(),
                source,
            })?;

        let temp = self.temp_path();
        let written = fs::File::create(&temp).and_then(|mut file| {
            file.write_all(json.as_bytes())?;
            file.write_all(b"\n")?;
            file.sync_all()
        });
        if let Err(source) = written {
            if let Err(cleanup) = fs::remove_file(&temp) {
                warn!(
                    path = %temp.display(),
                    error = %cleanup,
                    "Failed to remove partial temporary file"
                );
            }
            return Err(StorageError::Io { path: temp, source });
        }
        fs::rename(&temp, &self.path).map_err(|source| self.io_error(source))?;

        info!(
            path = %self.path.display(),
            entities = snapshot.entity_count(),
            bytes = json.len(),
            "Saved data file"
        );
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".");
        name.push(TEMP_SUFFIX);
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_file_sits_next_to_target() {
        let store = JsonPlannerStorage::new("data/planner.json");
        assert_eq!(store.temp_path(), PathBuf::from("data/planner.json.tmp"));
    }

    #[test]
    fn path_is_kept_verbatim() {
        let store = JsonPlannerStorage::new("planner.json");
        assert_eq!(store.path(), Path::new("planner.json"));
    }
}
