//! In-memory SnapshotRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::repository::{RepositoryError, Result, SaveFile, SaveSlot, SnapshotRepository};

/// In-memory implementation of SnapshotRepository.
#[derive(Default)]
pub struct InMemorySnapshotRepository {
    saves: RwLock<BTreeMap<SaveSlot, SaveFile>>,
}

impl InMemorySnapshotRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotRepository for InMemorySnapshotRepository {
    fn save(&self, slot: SaveSlot, save: &SaveFile) -> Result<()> {
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.insert(slot, save.clone());
        Ok(())
    }

    fn load(&self, slot: SaveSlot) -> Result<Option<SaveFile>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(saves.get(&slot).cloned())
    }

    fn exists(&self, slot: SaveSlot) -> bool {
        self.saves
            .read()
            .map(|saves| saves.contains_key(&slot))
            .unwrap_or(false)
    }

    fn delete(&self, slot: SaveSlot) -> Result<bool> {
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(saves.remove(&slot).is_some())
    }
}
