//! Snapshot persistence: JSON load/save with atomic replace.

use super::ConversationState;
use crate::error::StoreError;
use std::fs;
use std::path::{Path, PathBuf};

/// Persists [`ConversationState`] snapshots inside the mbox directory.
///
/// Two well-known locations: the autosave file, written after every resolved
/// turn, and the default named snapshot used by `.save`/`.load` when no path
/// is given. Saves go through a temp-file-then-rename so a failed write never
/// corrupts the previous snapshot.
pub struct SnapshotStore {
    autosave_path: PathBuf,
    snapshot_path: PathBuf,
}

const AUTOSAVE_FILE: &str = "autosave.json";

impl SnapshotStore {
    #[must_use]
    pub fn new(mbox_dir: &Path, snapshot_file: &str) -> Self {
        Self {
            autosave_path: mbox_dir.join(AUTOSAVE_FILE),
            snapshot_path: mbox_dir.join(snapshot_file),
        }
    }

    #[must_use]
    pub fn autosave_path(&self) -> &Path {
        &self.autosave_path
    }

    #[must_use]
    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// Load a snapshot. Fails with [`StoreError::NotFound`] when the file is
    /// absent and [`StoreError::Parse`] when the content is not a well-formed
    /// snapshot or violates the history invariants.
    pub fn load(&self, path: &Path) -> Result<ConversationState, StoreError> {
        let raw = fs::read_to_string(path).map_err(|error| {
            if error.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(path.to_path_buf())
            } else {
                StoreError::Io(error)
            }
        })?;

        let state: ConversationState =
            serde_json::from_str(&raw).map_err(|error| StoreError::Parse(error.to_string()))?;
        state.check_invariants().map_err(StoreError::Parse)?;

        Ok(state)
    }

    /// Save a complete snapshot. The write lands in a temp file first and is
    /// renamed over the target, so on failure the prior file is intact.
    pub fn save(&self, path: &Path, state: &ConversationState) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let serialized = serde_json::to_string_pretty(state)
            .map_err(|error| StoreError::Parse(error.to_string()))?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, serialized)?;

        if let Err(rename_error) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(StoreError::Io(rename_error));
        }

        Ok(())
    }

    /// Save to the fixed autosave location.
    pub fn autosave(&self, state: &ConversationState) -> Result<(), StoreError> {
        self.save(&self.autosave_path, state)
    }
}
