//! Durable history store: one JSON file holding the full turn log.
//!
//! Loading fails soft — a missing or malformed file yields an empty history,
//! never an error. Saving replaces the whole file in one write; callers are
//! allowed to ignore the result because a persistence failure must never
//! abort an in-progress exchange.

use std::path::PathBuf;

use islet_common::{StorageError, Turn};
use tracing::warn;

/// The single persisted key: the history file on disk.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Platform default: `<data dir>/islet/history.json`.
    pub fn default_path() -> Result<PathBuf, StorageError> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| StorageError::Io("could not determine data directory".into()))?;
        Ok(data_dir.join("islet").join("history.json"))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Load the persisted history. Missing file → empty. Malformed file →
    /// empty, with a warning; the bad file stays on disk until the next save.
    pub fn load(&self) -> Vec<Turn> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str(&content) {
            Ok(history) => history,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "malformed history file, starting empty");
                Vec::new()
            }
        }
    }

    /// Replace the persisted history with `history`.
    pub fn save(&self, history: &[Turn]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::Io(e.to_string()))?;
        }

        let content = serde_json::to_string(history)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|e| StorageError::Io(e.to_string()))
    }

    /// Remove the persisted history. Errors are ignored; a file that cannot
    /// be removed will be overwritten by the next save anyway.
    pub fn clear(&self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %e, "failed to clear history file");
            }
        }
    }
}
