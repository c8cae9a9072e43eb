//! Topic-based event bus implementation.

use tokio::sync::broadcast;

use super::{GameEvent, PresentationSink, Topic};

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing is best-effort: with no subscribers
/// the event is dropped, and slow subscribers observe `Lagged`.
#[derive(Clone)]
pub struct EventBus {
    turn: broadcast::Sender<GameEvent>,
    unit: broadcast::Sender<GameEvent>,
    combat: broadcast::Sender<GameEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            turn: broadcast::channel(capacity).0,
            unit: broadcast::channel(capacity).0,
            combat: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<GameEvent> {
        match topic {
            Topic::Turn => &self.turn,
            Topic::Unit => &self.unit,
            Topic::Combat => &self.combat,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: GameEvent) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<GameEvent> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to every topic at once.
    pub fn subscribe_all(&self) -> Vec<(Topic, broadcast::Receiver<GameEvent>)> {
        [Topic::Turn, Topic::Unit, Topic::Combat]
            .into_iter()
            .map(|topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl PresentationSink for EventBus {
    fn publish(&self, event: &GameEvent) {
        EventBus::publish(self, event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{Side, TurnPhase, UnitId, HexCoord};

    #[test]
    fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut turns = bus.subscribe(Topic::Turn);
        let mut units = bus.subscribe(Topic::Unit);

        bus.publish(GameEvent::UnitDied {
            unit: UnitId(4),
            side: Side::SideB,
            position: HexCoord::new(1, -3),
        });
        bus.publish(GameEvent::BattleEnded {
            result: TurnPhase::Victory,
            turn_number: 5,
        });

        assert_eq!(units.try_recv().unwrap().name(), "unit-died");
        assert!(units.try_recv().is_err());
        assert_eq!(turns.try_recv().unwrap().name(), "battle-ended");
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let bus = EventBus::new();
        PresentationSink::publish(
            &bus,
            &GameEvent::SideTurnStarted {
                side: Side::SideA,
                turn_number: 1,
            },
        );
    }
}
