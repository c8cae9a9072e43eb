//! Automated battle loop.

use std::fmt;

use anyhow::Result;
use tactics_content::ScenarioSpec;
use tactics_core::{GameConfig, TurnPhase};
use tactics_runtime::{
    EntropyRng, EventBus, FileSnapshotRepository, PresentationSink, RuntimeConfig, SaveMetadata,
    SaveSlot, SnapshotRepository, TracingSink, TurnController,
};

use crate::narration::{DamageTally, Narrator, spawn_damage_tally};

/// Summary printed once the battle stops.
pub struct BattleReport {
    /// `None` when the turn cap stopped the battle first.
    pub result: Option<TurnPhase>,
    pub turns: u32,
    pub survivors: Vec<String>,
    pub damage: Vec<(String, u32)>,
    pub saved: Option<SaveMetadata>,
}

impl fmt::Display for BattleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.result {
            Some(result) => writeln!(f, "Result: {result} after {} turns", self.turns)?,
            None => writeln!(f, "No result after {} turns", self.turns)?,
        }
        writeln!(f, "Survivors: {}", self.survivors.join(", "))?;
        for (name, damage) in &self.damage {
            writeln!(f, "  {name}: {damage} damage dealt")?;
        }
        if let Some(saved) = &self.saved {
            write!(f, "Saved to slot {} as \"{}\"", saved.slot, saved.save_name)?;
        }
        Ok(())
    }
}

/// Plays `scenario` with both sides automated.
pub async fn run(
    scenario: &ScenarioSpec,
    game_config: &GameConfig,
    config: &RuntimeConfig,
) -> Result<BattleReport> {
    let state = scenario.build_with(game_config)?;

    let mut profile = game_config.ai;
    if let Some(aggressiveness) = config.ai_aggressiveness {
        profile = profile.with_aggressiveness(aggressiveness);
    }

    let bus = EventBus::new();
    let tally = spawn_damage_tally(&bus);
    let names = Narrator::new(&state);
    let sinks: Vec<Box<dyn PresentationSink>> =
        vec![Box::new(Narrator::new(&state)), Box::new(TracingSink), Box::new(bus)];

    let builder = TurnController::builder(state)
        .ai_profile(profile)
        .automate_all()
        .sink(sinks);
    let mut controller = match config.seed {
        Some(seed) => builder.seed(seed),
        None => builder.rng(EntropyRng::from_entropy()),
    }
    .build();

    controller.start_first_turn()?;
    while !controller.is_over() {
        if controller.turn_number() > config.max_turns {
            tracing::warn!(max_turns = config.max_turns, "Turn cap reached; stopping");
            break;
        }
        while controller.process_next_unit()?.is_some() {
            tokio::time::sleep(config.turn_delay).await;
        }
        if !controller.is_over() {
            controller.end_side_turn()?;
        }
    }

    let saved = match config.save_data_dir {
        Some(_) => Some(save(&controller, scenario, config)?),
        None => None,
    };

    let state = controller.state();
    let result = controller.is_over().then(|| controller.phase());
    let turns = controller.turn_number();
    let survivors = state.units().map(|unit| unit.name().to_owned()).collect();

    // Dropping the controller closes the bus and lets the tally finish
    drop(controller);
    let damage = named(&names, tally.await?);

    Ok(BattleReport {
        result,
        turns,
        survivors,
        damage,
        saved,
    })
}

fn save(
    controller: &TurnController,
    scenario: &ScenarioSpec,
    config: &RuntimeConfig,
) -> Result<SaveMetadata> {
    let repository = FileSnapshotRepository::new(config.save_dir(), config.save_format)?;
    let slot = save_slot(&repository)?;
    let name = format!("{} (turn {})", scenario.name, controller.turn_number());
    Ok(controller.save(&repository, slot, name)?)
}

/// First free slot, or the slot holding the oldest save when all are taken.
fn save_slot<R>(repository: &R) -> Result<SaveSlot>
where
    R: SnapshotRepository + ?Sized,
{
    if let Some(slot) = repository.first_free_slot() {
        return Ok(slot);
    }
    let slot = match repository.list_slots()?.last() {
        Some(oldest) => oldest.slot,
        None => SaveSlot::new(0)?,
    };
    tracing::warn!(%slot, "All save slots are taken; replacing the oldest save");
    Ok(slot)
}

fn named(narrator: &Narrator, tally: DamageTally) -> Vec<(String, u32)> {
    tally
        .into_iter()
        .map(|(unit, damage)| (narrator.unit_name(unit), damage))
        .collect()
}

#[cfg(test)]
mod tests {
    use tactics_content::ScenarioSpec;
    use tactics_runtime::{InMemorySnapshotRepository, MAX_SAVE_SLOTS};

    use super::*;

    #[test]
    fn save_slot_prefers_free_slots() {
        let repository = InMemorySnapshotRepository::new();
        assert_eq!(save_slot(&repository).unwrap(), SaveSlot::new(0).unwrap());
    }

    #[test]
    fn full_slots_replace_the_oldest_save() {
        let repository = InMemorySnapshotRepository::new();
        let controller =
            TurnController::builder(ScenarioSpec::default_skirmish().build().unwrap()).build();

        // Slot 3 is written first, so it holds the oldest save
        let order = [3, 0, 1, 2, 4];
        for (index, slot) in order.into_iter().enumerate() {
            controller
                .save(&repository, SaveSlot::new(slot).unwrap(), format!("save {index}"))
                .unwrap();
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert_eq!(order.len() as u32, MAX_SAVE_SLOTS);
        assert!(repository.first_free_slot().is_none());

        assert_eq!(save_slot(&repository).unwrap(), SaveSlot::new(3).unwrap());
    }
}
