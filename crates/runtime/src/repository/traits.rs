//! Repository contract for saving and loading battles.

use super::{Result, SaveFile, SaveMetadata, SaveSlot};

/// Repository for saved battles, indexed by slot.
pub trait SnapshotRepository: Send + Sync {
    /// Save a battle into `slot`, replacing whatever was there.
    fn save(&self, slot: SaveSlot, save: &SaveFile) -> Result<()>;

    /// Load the battle stored in `slot`.
    fn load(&self, slot: SaveSlot) -> Result<Option<SaveFile>>;

    /// Check if `slot` holds a save.
    fn exists(&self, slot: SaveSlot) -> bool;

    /// Delete the save in `slot`. Returns false if the slot was empty.
    fn delete(&self, slot: SaveSlot) -> Result<bool>;

    /// Metadata of every readable save, newest first.
    ///
    /// Unreadable slots are logged and skipped.
    fn list_slots(&self) -> Result<Vec<SaveMetadata>> {
        let mut saves = Vec::new();
        for slot in SaveSlot::all() {
            match self.load(slot) {
                Ok(Some(save)) => saves.push(save.metadata),
                Ok(None) => {}
                Err(error) => tracing::warn!(%slot, %error, "Skipping unreadable save slot"),
            }
        }
        saves.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(saves)
    }

    /// Lowest empty slot, if any.
    fn first_free_slot(&self) -> Option<SaveSlot> {
        SaveSlot::all().find(|slot| !self.exists(*slot))
    }
}
