//! Data-driven battle content and loaders.
//!
//! This crate houses the starting rosters and provides loaders for RON/TOML
//! data files:
//! - Scenarios: board size plus the units each side fields (RON)
//! - Game configuration: board defaults and AI tuning (TOML)
//!
//! Content only seeds a battle; once built, the [`tactics_core::GameState`]
//! owns everything.

pub mod scenario;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use scenario::{ScenarioSpec, UnitSpec};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, ScenarioLoader};
