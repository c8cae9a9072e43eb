//! Save slot and save file types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tactics_core::{GameSnapshot, GameState, SnapshotError, TurnPhase};

use crate::repository::RepositoryError;

/// Number of save slots available.
pub const MAX_SAVE_SLOTS: u32 = 5;

/// Index of a save slot, always below [`MAX_SAVE_SLOTS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct SaveSlot(u32);

impl SaveSlot {
    pub fn new(index: u32) -> Result<Self, RepositoryError> {
        if index >= MAX_SAVE_SLOTS {
            return Err(RepositoryError::InvalidSlot {
                slot: index,
                max: MAX_SAVE_SLOTS,
            });
        }
        Ok(Self(index))
    }

    pub fn index(self) -> u32 {
        self.0
    }

    /// Every slot in index order.
    pub fn all() -> impl Iterator<Item = SaveSlot> {
        (0..MAX_SAVE_SLOTS).map(SaveSlot)
    }
}

impl TryFrom<u32> for SaveSlot {
    type Error = RepositoryError;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl From<SaveSlot> for u32 {
    fn from(slot: SaveSlot) -> Self {
        slot.0
    }
}

impl fmt::Display for SaveSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// On-disk encoding of save files.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SnapshotFormat {
    /// Human-readable JSON (`save_{slot}.json`).
    #[default]
    Json,
    /// Compact bincode (`save_{slot}.bin`).
    Binary,
}

impl SnapshotFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Binary => "bin",
        }
    }
}

/// Summary of a save shown when listing slots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub slot: SaveSlot,
    pub save_name: String,
    pub saved_at: DateTime<Utc>,
    pub turn_number: u32,
    pub phase: TurnPhase,
    pub game_version: String,
}

/// Everything stored in one slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    pub metadata: SaveMetadata,
    pub snapshot: GameSnapshot,
}

impl SaveFile {
    /// Captures the current battle for `slot`, stamped with the current time.
    pub fn capture(slot: SaveSlot, save_name: impl Into<String>, state: &GameState) -> Self {
        let snapshot = state.to_snapshot();
        Self {
            metadata: SaveMetadata {
                slot,
                save_name: save_name.into(),
                saved_at: Utc::now(),
                turn_number: snapshot.turn_number,
                phase: snapshot.phase,
                game_version: env!("CARGO_PKG_VERSION").to_owned(),
            },
            snapshot,
        }
    }

    /// Rebuilds the saved battle.
    pub fn restore(&self) -> Result<GameState, SnapshotError> {
        GameState::from_snapshot(&self.snapshot)
    }
}
