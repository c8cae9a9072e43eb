//! Combat resolution system.
//!
//! This module provides pure functions for resolving attacks between two
//! units. Nothing here mutates state: [`resolve_attack`] reads unit snapshots
//! and draws rolls, and the engine applies the resulting [`CombatOutcome`].
//!
//! # Core Functions
//!
//! - `resolve_attack`: dodge, critical, damage and counterattack in one pass
//! - `base_damage` / `critical_damage` / `counter_damage`: damage formulas
//! - `apply_damage`: HP reduction (clamped to 0)
//! - `preview`: roll-free estimate for UI and AI

pub mod damage;
pub mod preview;
pub mod result;

pub use damage::{apply_damage, base_damage, counter_damage, critical_damage};
pub use preview::{CombatPreview, preview};
pub use result::{AttackOutcome, CombatOutcome, resolve_attack};
