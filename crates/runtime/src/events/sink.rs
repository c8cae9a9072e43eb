use std::sync::{Arc, Mutex};

use super::GameEvent;

/// Receiver of presentation events.
///
/// Implementations must not fail and must not block for long; the battle
/// continues regardless of what a sink does with an event.
pub trait PresentationSink: Send + Sync {
    fn publish(&self, event: &GameEvent);
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn publish(&self, _event: &GameEvent) {}
}

/// Logs every event through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl PresentationSink for TracingSink {
    fn publish(&self, event: &GameEvent) {
        match event {
            GameEvent::SideTurnStarted { side, turn_number } => {
                tracing::info!(%side, turn = turn_number, "Side turn started");
            }
            GameEvent::UnitMoved { unit, from, to } => {
                tracing::debug!(%unit, %from, %to, "Unit moved");
            }
            GameEvent::UnitAttacked { outcome } => {
                tracing::debug!(
                    attacker = %outcome.attacker,
                    defender = %outcome.defender,
                    damage = outcome.damage_dealt,
                    dodged = outcome.was_dodged,
                    critical = outcome.was_critical,
                    counter = ?outcome.counter_damage_dealt,
                    "Unit attacked"
                );
            }
            GameEvent::UnitDied { unit, side, position } => {
                tracing::info!(%unit, %side, %position, "Unit died");
            }
            GameEvent::BattleEnded {
                result,
                turn_number,
            } => {
                tracing::info!(%result, turn = turn_number, "Battle ended");
            }
        }
    }
}

/// Records events in memory; cloning shares the same log.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every event recorded so far.
    pub fn events(&self) -> Vec<GameEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Names of every event recorded so far.
    pub fn names(&self) -> Vec<&'static str> {
        self.events().iter().map(GameEvent::name).collect()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl PresentationSink for EventLog {
    fn publish(&self, event: &GameEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(_) => tracing::warn!("Event log lock poisoned; dropping {}", event.name()),
        }
    }
}

impl<S: PresentationSink + ?Sized> PresentationSink for Arc<S> {
    fn publish(&self, event: &GameEvent) {
        (**self).publish(event);
    }
}

/// Fan-out to several sinks in order.
impl PresentationSink for Vec<Box<dyn PresentationSink>> {
    fn publish(&self, event: &GameEvent) {
        for sink in self {
            sink.publish(event);
        }
    }
}
