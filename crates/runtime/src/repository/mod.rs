//! Repository layer for saved battles.
//!
//! Saves live in a small fixed number of slots. Each slot holds a
//! [`SaveFile`]: metadata for listing plus the flat [`tactics_core::GameSnapshot`].

mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use file::FileSnapshotRepository;
pub use memory::InMemorySnapshotRepository;
pub use traits::SnapshotRepository;
pub use types::{MAX_SAVE_SLOTS, SaveFile, SaveMetadata, SaveSlot, SnapshotFormat};
