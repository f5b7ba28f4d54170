use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::errors::AppError;
use crate::models::Workout;

/// The single slot the whole collection lives under.
pub const STORAGE_SLOT: &str = "workouts";

/// A named textual key/value slot. The discipline is read-modify-write of
/// the whole payload; there is no partial update.
pub trait SlotStore {
    /// Returns the slot's payload, or `None` when the slot was never
    /// written (no prior session).
    fn read(&self, slot: &str) -> Result<Option<String>, AppError>;

    /// Overwrites the slot with `payload`.
    fn write(&mut self, slot: &str, payload: &str) -> Result<(), AppError>;

    /// Deletes the slot. Deleting an absent slot is fine.
    fn remove(&mut self, slot: &str) -> Result<(), AppError>;
}

/// One file per slot under a base directory.
#[derive(Debug)]
pub struct FileSlotStore {
    dir: PathBuf,
}

impl FileSlotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }
}

impl SlotStore for FileSlotStore {
    fn read(&self, slot: &str) -> Result<Option<String>, AppError> {
        match fs::read_to_string(self.slot_path(slot)) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, slot: &str, payload: &str) -> Result<(), AppError> {
        fs::write(self.slot_path(slot), payload)?;
        Ok(())
    }

    fn remove(&mut self, slot: &str) -> Result<(), AppError> {
        match fs::remove_file(self.slot_path(slot)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory slots for tests.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: HashMap<String, String>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStore for MemorySlotStore {
    fn read(&self, slot: &str) -> Result<Option<String>, AppError> {
        Ok(self.slots.get(slot).cloned())
    }

    fn write(&mut self, slot: &str, payload: &str) -> Result<(), AppError> {
        self.slots.insert(slot.to_string(), payload.to_string());
        Ok(())
    }

    fn remove(&mut self, slot: &str) -> Result<(), AppError> {
        self.slots.remove(slot);
        Ok(())
    }
}

/// Serializes the whole ordered collection into the `"workouts"` slot and
/// reconstructs typed records from it. Derived metrics and descriptions are
/// persisted with the records and restored verbatim, never recomputed.
#[derive(Debug)]
pub struct WorkoutArchive<S: SlotStore> {
    store: S,
}

impl<S: SlotStore> WorkoutArchive<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Writes the whole collection, replacing any previous payload. Called
    /// after every mutation, so the persisted state is always whole and
    /// current.
    pub fn save(&mut self, records: &[Workout]) -> Result<(), AppError> {
        let payload = serde_json::to_string(records)?;
        self.store.write(STORAGE_SLOT, &payload)
    }

    /// Loads the collection. An absent slot means no prior session and
    /// yields an empty collection; a present but unparseable payload is the
    /// distinct `CorruptState` error so the caller can decide to start
    /// empty instead of crashing.
    pub fn load(&self) -> Result<Vec<Workout>, AppError> {
        match self.store.read(STORAGE_SLOT)? {
            None => Ok(Vec::new()),
            Some(payload) => {
                serde_json::from_str(&payload).map_err(|e| AppError::CorruptState(e.to_string()))
            }
        }
    }

    /// Deletes the slot. Used by reset.
    pub fn clear(&mut self) -> Result<(), AppError> {
        self.store.remove(STORAGE_SLOT)
    }
}
