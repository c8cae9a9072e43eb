//! Shared types for repository layer.

mod save;

pub use save::{MAX_SAVE_SLOTS, SaveFile, SaveMetadata, SaveSlot, SnapshotFormat};
