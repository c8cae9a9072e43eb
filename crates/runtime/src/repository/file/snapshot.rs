//! File-based SnapshotRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::repository::{
    RepositoryError, Result, SaveFile, SaveSlot, SnapshotFormat, SnapshotRepository,
};

/// File-based implementation of SnapshotRepository.
///
/// Stores each slot as `save_{slot}.json` or `save_{slot}.bin` depending on
/// the configured [`SnapshotFormat`]. Writes go to a temp file first and are
/// moved into place with a rename.
pub struct FileSnapshotRepository {
    base_dir: PathBuf,
    format: SnapshotFormat,
}

impl FileSnapshotRepository {
    /// Create a new file-based repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>, format: SnapshotFormat) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir, format })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn format(&self) -> SnapshotFormat {
        self.format
    }

    /// Get the path to a slot file.
    fn save_path(&self, slot: SaveSlot) -> PathBuf {
        self.base_dir
            .join(format!("save_{}.{}", slot.index(), self.format.extension()))
    }

    fn encode(&self, save: &SaveFile) -> Result<Vec<u8>> {
        match self.format {
            SnapshotFormat::Json => {
                serde_json::to_vec_pretty(save).map_err(|e| RepositoryError::Json(e.to_string()))
            }
            SnapshotFormat::Binary => {
                bincode::serialize(save).map_err(|e| RepositoryError::Serialization(e.to_string()))
            }
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<SaveFile> {
        match self.format {
            SnapshotFormat::Json => {
                serde_json::from_slice(bytes).map_err(|e| RepositoryError::Json(e.to_string()))
            }
            SnapshotFormat::Binary => bincode::deserialize(bytes)
                .map_err(|e| RepositoryError::Serialization(e.to_string())),
        }
    }
}

impl SnapshotRepository for FileSnapshotRepository {
    fn save(&self, slot: SaveSlot, save: &SaveFile) -> Result<()> {
        let path = self.save_path(slot);
        let temp_path = path.with_extension(format!("{}.tmp", self.format.extension()));

        let bytes = self.encode(save)?;

        // Write to temp file
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;

        // Atomic rename
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved slot[{}] to {}", slot, path.display());

        Ok(())
    }

    fn load(&self, slot: SaveSlot) -> Result<Option<SaveFile>> {
        let path = self.save_path(slot);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let save = self.decode(&bytes)?;

        if save.metadata.slot != slot {
            return Err(RepositoryError::CorruptedData(format!(
                "{} claims slot {}",
                path.display(),
                save.metadata.slot
            )));
        }

        tracing::debug!("Loaded slot[{}] from {}", slot, path.display());

        Ok(Some(save))
    }

    fn exists(&self, slot: SaveSlot) -> bool {
        self.save_path(slot).exists()
    }

    fn delete(&self, slot: SaveSlot) -> Result<bool> {
        let path = self.save_path(slot);

        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(&path).map_err(RepositoryError::Io)?;
        tracing::debug!("Deleted slot[{}]", slot);
        Ok(true)
    }
}
