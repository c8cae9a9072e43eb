//! Human-readable battle output.

use std::collections::{BTreeMap, HashMap};

use tactics_core::{GameState, UnitId};
use tactics_runtime::{EventBus, GameEvent, PresentationSink, Topic};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

/// Prints each event as a line on stdout.
pub struct Narrator {
    names: HashMap<UnitId, String>,
}

impl Narrator {
    pub fn new(state: &GameState) -> Self {
        Self {
            names: state
                .units()
                .map(|unit| (unit.id(), unit.name().to_owned()))
                .collect(),
        }
    }

    pub fn unit_name(&self, unit: UnitId) -> String {
        self.names
            .get(&unit)
            .cloned()
            .unwrap_or_else(|| unit.to_string())
    }

    fn describe(&self, event: &GameEvent) -> String {
        match event {
            GameEvent::SideTurnStarted { side, turn_number } => {
                format!("-- turn {turn_number}: {side} --")
            }
            GameEvent::UnitMoved { unit, from, to } => {
                format!("{} moves {from} -> {to}", self.unit_name(*unit))
            }
            GameEvent::UnitAttacked { outcome } => {
                let attacker = self.unit_name(outcome.attacker);
                let defender = self.unit_name(outcome.defender);
                let mut line = if outcome.was_dodged {
                    format!("{attacker} attacks {defender}, who dodges")
                } else if outcome.was_critical {
                    format!(
                        "{attacker} critically hits {defender} for {}",
                        outcome.damage_dealt
                    )
                } else {
                    format!("{attacker} hits {defender} for {}", outcome.damage_dealt)
                };
                if let Some(counter) = outcome.counter_damage_dealt {
                    line.push_str(&format!(" and takes {counter} in return"));
                }
                line
            }
            GameEvent::UnitDied { unit, position, .. } => {
                format!("{} falls at {position}", self.unit_name(*unit))
            }
            GameEvent::BattleEnded {
                result,
                turn_number,
            } => format!("== {result} on turn {turn_number} =="),
        }
    }
}

impl PresentationSink for Narrator {
    fn publish(&self, event: &GameEvent) {
        println!("{}", self.describe(event));
    }
}

/// Damage dealt per unit, collected from the combat topic.
pub type DamageTally = BTreeMap<UnitId, u32>;

/// Spawns a task that tallies damage until the bus is dropped.
pub fn spawn_damage_tally(bus: &EventBus) -> JoinHandle<DamageTally> {
    let mut combat = bus.subscribe(Topic::Combat);
    tokio::spawn(async move {
        let mut tally = DamageTally::new();
        loop {
            match combat.recv().await {
                Ok(GameEvent::UnitAttacked { outcome }) => {
                    if !outcome.was_dodged {
                        *tally.entry(outcome.attacker).or_default() += outcome.damage_dealt;
                    }
                    if let Some(counter) = outcome.counter_damage_dealt {
                        *tally.entry(outcome.defender).or_default() += counter;
                    }
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Damage tally lagged behind combat events");
                }
                Err(RecvError::Closed) => break,
            }
        }
        tally
    })
}
