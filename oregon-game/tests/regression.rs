//! Canonical seed vectors. Expected values were produced by replaying the
//! generator by hand in the engine's call order.

use oregon_game::{
    DeathCause, EatingLevel, GameState, HazardEvent, Journey, RiderTactic, ScriptedDecisions,
    ShootingSkill, SignalKind, TrailRng, TurnAction, TurnOutcome,
};

fn canonical_state() -> GameState {
    GameState {
        food: 100,
        bullets: 500,
        clothing: 50,
        misc_supplies: 50,
        cash: 100,
        oxen: 250,
        shooting_skill: ShootingSkill::FairToMiddlin,
        ..GameState::default()
    }
}

fn well_stocked_state() -> GameState {
    GameState {
        food: 400,
        bullets: 3_000,
        clothing: 120,
        misc_supplies: 150,
        cash: 200,
        oxen: 300,
        shooting_skill: ShootingSkill::FairToMiddlin,
        ..GameState::default()
    }
}

#[test]
fn pinned_seed_first_travel_segment() {
    let mut journey = Journey::new(canonical_state(), TrailRng::new(0x1234_5678));
    let mut script = ScriptedDecisions::new();

    let outcome = journey.run_turn(&mut script).unwrap();
    assert_eq!(outcome, TurnOutcome::Continue);

    let traveled: Vec<i32> = journey
        .journal()
        .entries()
        .iter()
        .filter_map(|signal| match signal.kind {
            SignalKind::Traveled { miles } => Some(miles),
            _ => None,
        })
        .collect();
    assert_eq!(traveled, vec![300]);

    let kinds: Vec<SignalKind> = journey
        .journal()
        .for_turn(1)
        .map(|signal| signal.kind)
        .filter(|kind| {
            matches!(
                kind,
                SignalKind::RidersAhead { .. }
                    | SignalKind::RidersHeldFire
                    | SignalKind::Hazard { .. }
            )
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            SignalKind::RidersAhead { hostile: true },
            SignalKind::RidersHeldFire,
            SignalKind::Hazard {
                event: HazardEvent::HeavyRains
            },
        ]
    );

    let state = journey.state();
    assert_eq!(state.turn_number, 1);
    assert_eq!(state.food, 72);
    assert_eq!(state.bullets, 0);
    assert_eq!(state.clothing, 50);
    assert_eq!(state.misc_supplies, 35);
    assert_eq!(state.cash, 100);
    assert_eq!(state.miles_traveled, 205);
    assert_eq!(state.miles_previous_turn, 0);
    assert_eq!(state.eating_level, EatingLevel::Moderately);
    assert!(!state.fort.is_available());
    assert_eq!(journey.rng().state(), 0x6ac7_7c90);
    assert_eq!(journey.rng().draws(), 8);
}

#[test]
fn pinned_seed_full_run() {
    let mut journey = Journey::new(canonical_state(), TrailRng::default());
    let mut script = ScriptedDecisions::new();

    let outcome = journey.play_to_end(&mut script);
    assert_eq!(outcome, TurnOutcome::Died(DeathCause::Disease));
    let state = journey.state();
    assert_eq!(state.turn_number, 3);
    assert_eq!(state.miles_traveled, 450);
    assert_eq!(state.misc_supplies, -10);
    assert_eq!(journey.rng().state(), 0x7bc5_81cb);
    assert_eq!(journey.rng().draws(), 15);
}

#[test]
fn hunting_turns_follow_the_stream() {
    let mut journey = Journey::new(well_stocked_state(), TrailRng::default());
    let mut script = ScriptedDecisions::new()
        .with_actions([TurnAction::Hunt, TurnAction::Hunt])
        .with_tactics([RiderTactic::Attack; 4])
        .fallback_eating(EatingLevel::Well);

    for _ in 0..2 {
        assert_eq!(journey.run_turn(&mut script).unwrap(), TurnOutcome::Continue);
    }

    let state = journey.state();
    assert_eq!(state.food, 455);
    assert_eq!(state.bullets, 2_172);
    assert_eq!(state.clothing, 120);
    assert_eq!(state.misc_supplies, 122);
    assert_eq!(state.cash, 200);
    assert_eq!(state.miles_traveled, 292);
    assert_eq!(state.miles_previous_turn, 191);
    assert_eq!(journey.rng().state(), 0x4ea8_6fa7);
    assert_eq!(journey.rng().draws(), 19);
    assert!(journey.journal().any(|kind| matches!(
        kind,
        SignalKind::Hazard {
            event: HazardEvent::HailStorm
        }
    )));
}
