//! Local persistence: the whole app state as one JSON document.
//!
//! The core never touches disk. The CLI loads state on startup, runs one
//! operation to completion, and saves on success — a failed operation
//! never persists a partial record.
//!
//! ```text
//! <root>/
//!   state.json     # trips + engine-hour ledger
//!   attachments/   # content-addressed photo blobs
//! ```

use std::path::Path;
use std::{fs, io, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::ledger::EngineLedger;
use crate::model::Trip;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// Everything the app persists.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    pub trips: Vec<Trip>,
    pub engine_hours: EngineLedger,
}

/// Local file-based storage for the trip log.
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Creates a new storage instance rooted at the given directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Returns the default storage root: `~/.moana/`.
    #[must_use]
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".moana"))
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loads persisted state; `None` when nothing has been saved yet.
    pub fn load(&self) -> Result<Option<PersistedState>> {
        let path = self.state_path();
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// Saves the full state, replacing what was there.
    pub fn save(&self, state: &PersistedState) -> Result<()> {
        let json = serde_json::to_string_pretty(state)?;
        fs::write(self.state_path(), json)?;
        Ok(())
    }

    fn state_path(&self) -> PathBuf {
        self.root.join("state.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;
    use jiff::civil::Date;
    use tempfile::TempDir;
    use uuid::Uuid;

    use crate::model::{PreDepartureDraft, TripKind, TripStatus, Vessel};

    fn test_storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("moana")).unwrap();
        (dir, storage)
    }

    fn sample_trip() -> Trip {
        Trip {
            id: Uuid::new_v4(),
            date: Date::constant(2025, 6, 14),
            start: "07:00".to_string(),
            planned_duration_hrs: 5,
            kind: TripKind::FishingCharter,
            vessel: Vessel::Temu,
            captain: "Moana".to_string(),
            deckhand: "Hemi".to_string(),
            capacity: 6,
            pax: 4,
            created_at: Timestamp::now(),
            status: TripStatus::Scheduled {
                draft: PreDepartureDraft::for_vessel(Vessel::Temu),
            },
        }
    }

    #[test]
    fn load_before_any_save_is_none() {
        let (_dir, storage) = test_storage();
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn state_round_trips() {
        let (_dir, storage) = test_storage();
        let trip = sample_trip();

        let mut state = PersistedState::default();
        state.trips.push(trip.clone());
        state.engine_hours.record(Vessel::Temu, "Honda 150", 125.0);
        storage.save(&state).unwrap();

        let loaded = storage.load().unwrap().unwrap();
        assert_eq!(loaded.trips.len(), 1);
        assert_eq!(loaded.trips[0].id, trip.id);
        assert_eq!(loaded.trips[0].start, "07:00");
        assert_eq!(
            loaded.engine_hours.current_hours(Vessel::Temu, "Honda 150"),
            125.0
        );
    }

    #[test]
    fn save_replaces_previous_state() {
        let (_dir, storage) = test_storage();

        let mut state = PersistedState::default();
        state.trips.push(sample_trip());
        storage.save(&state).unwrap();

        storage.save(&PersistedState::default()).unwrap();
        let loaded = storage.load().unwrap().unwrap();
        assert!(loaded.trips.is_empty());
    }
}
