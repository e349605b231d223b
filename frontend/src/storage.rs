use gloo_console::error;
use gloo_storage::{LocalStorage, Storage, errors::StorageError};
use serde::{Deserialize, Serialize};
use workout_tracker_lib::{workout::Workout, workout_log::SortKey};

const STORAGE_KEY: &str = "workouts";

/// The one localStorage snapshot: every workout plus the active sort key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredState {
    pub workouts: Vec<Workout>,
    pub sort_by: SortKey,
}

/// Reads the snapshot. A missing key means a fresh start; anything the
/// current shape cannot deserialize is discarded rather than half-loaded.
pub fn load() -> Option<StoredState> {
    match LocalStorage::get(STORAGE_KEY) {
        Ok(state) => Some(state),
        Err(StorageError::KeyNotFound(_)) => None,
        Err(err) => {
            error!(format!("Discarding stored workouts: {}", err));
            None
        }
    }
}

/// Writes the full snapshot. Called after every mutating operation; a write
/// failure costs persistence, not the in-memory state, so it is only logged.
pub fn save(workouts: &[Workout], sort_by: SortKey) {
    let state = StoredState {
        workouts: workouts.to_vec(),
        sort_by,
    };
    if let Err(err) = LocalStorage::set(STORAGE_KEY, &state) {
        error!(format!("Failed to persist workouts: {}", err));
    }
}

pub fn clear() {
    LocalStorage::delete(STORAGE_KEY);
}
