//! Snapshot persistence — trait + JSON file implementation.
//!
//! The previous cycle's snapshot is read once at cycle start and the
//! current one written once at cycle end. Persistence is always a whole
//! snapshot replace, never a merge.

use std::fs;
use std::path::PathBuf;

use vigil_core::types::Snapshot;

use crate::error::Result;

/// Persistence backend for the previous-cycle snapshot.
pub trait SnapshotStore {
    /// Load the previously persisted snapshot.
    ///
    /// Missing or corrupt state yields an empty snapshot, never an error:
    /// "no history" just means every current entry gets reported new.
    fn load(&self) -> Snapshot;

    /// Replace the persisted snapshot with the current one.
    fn save(&self, snapshot: &Snapshot) -> Result<()>;
}

/// Stores the snapshot as a single pretty-printed JSON file.
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn load(&self) -> Snapshot {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Snapshot::empty(),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read snapshot, treating as no history"
                );
                return Snapshot::empty();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Snapshot file corrupt, treating as no history"
                );
                Snapshot::empty()
            }
        }
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, json)?;

        tracing::debug!(
            path = %self.path.display(),
            entries = snapshot.entries.len(),
            "Snapshot saved"
        );

        Ok(())
    }
}
