//! Presentation events and the sinks that receive them.
//!
//! The turn controller reports what happened as [`GameEvent`]s to a single
//! [`PresentationSink`]. Publishing is fire-and-forget: sinks never return
//! anything and never influence the battle.

mod bus;
mod sink;
mod types;

pub use bus::EventBus;
pub use sink::{EventLog, NullSink, PresentationSink, TracingSink};
pub use types::{GameEvent, Topic};
