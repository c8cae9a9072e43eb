//! Orchestration around the battle rules.
//!
//! This crate wires the core rules to everything a running game needs: the
//! turn controller that drives automated sides, the AI, presentation events,
//! save slots and configuration.
//!
//! Modules are organized by responsibility:
//! - [`controller`] hosts the turn controller and its builder
//! - [`api`] exposes the error and provider types clients interact with
//! - [`providers`] implements the heuristic AI
//! - [`events`] defines presentation events and sinks, including a topic bus
//! - [`repository`] persists battles into save slots
//! - [`config`] and [`rng`] cover environment settings and entropy rolls
pub mod api;
pub mod config;
pub mod controller;
pub mod events;
pub mod providers;
pub mod repository;
pub mod rng;

pub use api::{ActionProvider, Result, RuntimeError, WaitActionProvider};
pub use config::RuntimeConfig;
pub use controller::{ActionTaken, TurnController, TurnControllerBuilder};
pub use events::{EventBus, EventLog, GameEvent, NullSink, PresentationSink, Topic, TracingSink};
pub use providers::{AiContext, AiController, AttackScore, turn_order};
pub use repository::{
    FileSnapshotRepository, InMemorySnapshotRepository, MAX_SAVE_SLOTS, RepositoryError,
    SaveFile, SaveMetadata, SaveSlot, SnapshotFormat, SnapshotRepository,
};
pub use rng::EntropyRng;
