use tactics_core::{GameState, HexCoord, Side, TurnPhase, UnitStats};
use tactics_runtime::{EventLog, GameEvent, TurnController};

fn skirmish() -> GameState {
    let mut state = GameState::default();
    let roster = [
        ("Scout", Side::SideA, UnitStats::new(100, 10, 5, 3, 1), HexCoord::new(-3, 0)),
        ("Sniper", Side::SideA, UnitStats::new(80, 20, 3, 2, 3), HexCoord::new(-1, -2)),
        ("Enemy Scout", Side::SideB, UnitStats::new(90, 8, 4, 3, 1), HexCoord::new(3, -3)),
        ("Enemy Sniper", Side::SideB, UnitStats::new(70, 18, 2, 2, 3), HexCoord::new(1, -3)),
    ];
    for (name, side, stats, position) in roster {
        state.spawn(name, side, stats, position).unwrap();
    }
    state
}

fn run_to_completion(controller: &mut TurnController, max_turns: u32) {
    controller.start_first_turn().unwrap();
    while !controller.is_over() && controller.turn_number() <= max_turns {
        while controller.process_next_unit().unwrap().is_some() {
            assert!(controller.state().is_consistent());
        }
        if !controller.is_over() {
            controller.end_side_turn().unwrap();
        }
    }
}

#[test]
fn automated_battle_reaches_a_result() {
    let log = EventLog::new();
    let mut controller = TurnController::builder(skirmish())
        .seed(7)
        .sink(log.clone())
        .automate_all()
        .build();

    run_to_completion(&mut controller, 100);

    let phase = controller.phase();
    assert!(matches!(
        phase,
        TurnPhase::Victory | TurnPhase::Defeat | TurnPhase::Draw
    ));

    let events = log.events();
    let endings: Vec<_> = events
        .iter()
        .filter(|event| matches!(event, GameEvent::BattleEnded { .. }))
        .collect();
    assert_eq!(endings.len(), 1);
    assert!(matches!(endings[0], GameEvent::BattleEnded { result, .. } if *result == phase));

    let deaths = events
        .iter()
        .filter(|event| matches!(event, GameEvent::UnitDied { .. }))
        .count();
    let survivors = controller.state().units().count();
    assert_eq!(deaths + survivors, 4);
}

#[test]
fn seeded_battles_replay_identically() {
    let play = || {
        let log = EventLog::new();
        let mut controller = TurnController::builder(skirmish())
            .seed(11)
            .sink(log.clone())
            .automate_all()
            .build();
        run_to_completion(&mut controller, 100);
        (controller.snapshot(), log.events())
    };

    assert_eq!(play(), play());
}

#[test]
fn dead_units_never_act_again() {
    let log = EventLog::new();
    let mut controller = TurnController::builder(skirmish())
        .seed(5)
        .sink(log.clone())
        .automate_all()
        .build();
    run_to_completion(&mut controller, 100);

    let events = log.events();
    for (index, event) in events.iter().enumerate() {
        let GameEvent::UnitDied { unit, .. } = event else {
            continue;
        };
        let acted_later = events[index + 1..].iter().any(|later| match later {
            GameEvent::UnitMoved { unit: mover, .. } => mover == unit,
            GameEvent::UnitAttacked { outcome } => outcome.attacker == *unit,
            _ => false,
        });
        assert!(!acted_later, "{unit} acted after dying");
    }
}
