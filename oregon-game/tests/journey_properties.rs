use std::hash::Hasher;

use oregon_game::{
    ActionMenu, DeathCause, DecisionSource, EatingLevel, Flag, FortOrder, GameState, HazardEvent,
    Journey, JourneyError, MountainPass, RiderTactic, ScriptedDecisions, ShotWord, Signal,
    SignalKind, StatusSnapshot, TrailRng, TurnAction, TurnOutcome,
};
use twox_hash::XxHash64;

fn sturdy_state() -> GameState {
    GameState {
        food: 300,
        bullets: 2_500,
        clothing: 110,
        misc_supplies: 120,
        cash: 150,
        oxen: 280,
        ..GameState::default()
    }
}

fn run_fingerprint(seed: u32) -> u64 {
    let mut journey = Journey::new(sturdy_state(), TrailRng::new(seed));
    let mut script = ScriptedDecisions::new().fallback_eating(EatingLevel::Well);
    let outcome = journey.play_to_end(&mut script);

    let mut hasher = XxHash64::with_seed(0);
    hasher.write(
        serde_json::to_string(&(outcome, journey.state(), journey.journal()))
            .unwrap()
            .as_bytes(),
    );
    hasher.write_u32(journey.rng().state());
    hasher.finish()
}

#[test]
fn fixed_seed_runs_are_bit_for_bit_reproducible() {
    for seed in [1, 42, 0x1234_5678, 0xDEAD_BEEF, 2_024] {
        assert_eq!(run_fingerprint(seed), run_fingerprint(seed), "seed {seed}");
    }
    assert_ne!(run_fingerprint(1), run_fingerprint(2));
}

/// Wraps the scripted source and records every status it is shown.
struct StatusRecorder {
    inner: ScriptedDecisions,
    seen: Vec<StatusSnapshot>,
}

impl DecisionSource for StatusRecorder {
    fn turn_action(&mut self, status: &StatusSnapshot, menu: ActionMenu) -> TurnAction {
        self.seen.push(*status);
        self.inner.turn_action(status, menu)
    }

    fn fort_order(&mut self, status: &StatusSnapshot) -> FortOrder {
        self.seen.push(*status);
        self.inner.fort_order(status)
    }

    fn eating_level(&mut self, status: &StatusSnapshot) -> EatingLevel {
        self.seen.push(*status);
        self.inner.eating_level(status)
    }

    fn rider_tactic(&mut self, status: &StatusSnapshot, hostile: bool) -> RiderTactic {
        self.seen.push(*status);
        self.inner.rider_tactic(status, hostile)
    }

    fn shot_response(&mut self, word: ShotWord) -> bool {
        self.inner.shot_response(word)
    }

    fn observe(&mut self, signal: &Signal) {
        self.inner.observe(signal);
    }
}

#[test]
fn presented_supplies_are_never_negative() {
    for seed in 0..64 {
        let mut journey = Journey::new(sturdy_state(), TrailRng::new(seed));
        let mut recorder = StatusRecorder {
            inner: ScriptedDecisions::new()
                .with_actions([TurnAction::Hunt; 20])
                .with_tactics([RiderTactic::Run; 20]),
            seen: Vec::new(),
        };
        journey.play_to_end(&mut recorder);
        assert!(journey.status().food >= 0);
        for status in recorder.seen {
            assert!(status.food >= 0, "seed {seed}: {status:?}");
            assert!(status.bullets >= 0, "seed {seed}: {status:?}");
            assert!(status.clothing >= 0, "seed {seed}: {status:?}");
            assert!(status.misc_supplies >= 0, "seed {seed}: {status:?}");
            assert!(status.cash >= 0, "seed {seed}: {status:?}");
            assert!(status.miles_traveled >= 0, "seed {seed}: {status:?}");
            assert!(status.displayed_mileage <= 950);
        }
    }
}

#[test]
fn milestones_are_awarded_at_most_once() {
    for seed in 0..200 {
        let mut journey = Journey::new(sturdy_state(), TrailRng::new(seed));
        let mut script = ScriptedDecisions::new().fallback_eating(EatingLevel::Well);
        journey.play_to_end(&mut script);
        for pass in [MountainPass::SouthPass, MountainPass::BlueMountains] {
            let awards = journey
                .journal()
                .entries()
                .iter()
                .filter(|signal| signal.kind == SignalKind::PassCleared { pass })
                .count();
            assert!(awards <= 1, "seed {seed}: {pass:?} awarded {awards} times");
            assert_eq!(awards == 1, journey.state().has_flag(pass.flag()));
        }
    }
}

#[test]
fn every_run_ends_within_twenty_turns() {
    for seed in 0..100 {
        let mut journey = Journey::new(sturdy_state(), TrailRng::new(seed));
        let mut script = ScriptedDecisions::new();
        let outcome = journey.play_to_end(&mut script);
        assert!(outcome.is_terminal());
        assert!(journey.state().turn_number <= 20);
        if journey.state().turn_number == 20 && journey.state().miles_traveled < 2_040 {
            assert_eq!(outcome, TurnOutcome::Died(DeathCause::WinterBlizzard));
        }
    }
}

#[test]
fn reaching_twenty_turns_short_of_oregon_is_winter_death() {
    let state = GameState {
        turn_number: 20,
        miles_traveled: 2_039,
        ..sturdy_state()
    };
    let mut journey = Journey::new(state, TrailRng::new(5));
    let mut script = ScriptedDecisions::new();
    assert_eq!(
        journey.run_turn(&mut script),
        Ok(TurnOutcome::Died(DeathCause::WinterBlizzard))
    );
    assert_eq!(journey.rng().draws(), 0);
}

#[test]
fn exact_arrival_on_a_boundary_wins() {
    let state = GameState {
        turn_number: 12,
        miles_previous_turn: 1_900,
        miles_traveled: 2_040,
        ..sturdy_state()
    };
    let mut journey = Journey::new(state, TrailRng::new(5));
    let mut script = ScriptedDecisions::new();
    let outcome = journey.run_turn(&mut script).unwrap();
    let TurnOutcome::Won(arrival) = outcome else {
        panic!("expected a win, got {outcome:?}");
    };
    assert_eq!(arrival.total_days, 182);
    assert_eq!(arrival.date.to_string(), "1847-09-27");
    assert_eq!(arrival.weekday(), chrono::Weekday::Mon);
    assert_eq!(journey.rng().draws(), 0);
    assert!(journey.journal().any(|kind| matches!(kind, SignalKind::Arrived { .. })));
}

#[test]
fn arrival_on_the_last_turn_beats_winter() {
    let state = GameState {
        turn_number: 20,
        miles_previous_turn: 1_800,
        miles_traveled: 2_100,
        ..sturdy_state()
    };
    let mut journey = Journey::new(state, TrailRng::new(5));
    let mut script = ScriptedDecisions::new();
    assert!(matches!(
        journey.run_turn(&mut script),
        Ok(TurnOutcome::Won(_))
    ));
}

#[test]
fn short_larder_forces_poor_ration_of_thirteen() {
    let state = GameState {
        food: 22,
        ..sturdy_state()
    };
    let mut journey = Journey::new(state, TrailRng::new(77));
    let mut script = ScriptedDecisions::new().with_eating([EatingLevel::Well]);
    let _ = journey.run_turn(&mut script);

    assert_eq!(journey.state().eating_level, EatingLevel::Poorly);
    let consumed: Vec<i32> = journey
        .journal()
        .entries()
        .iter()
        .filter_map(|signal| match signal.kind {
            SignalKind::Ate { consumed, .. } => Some(consumed),
            _ => None,
        })
        .collect();
    assert_eq!(consumed, vec![13]);
}

#[test]
fn refused_hunt_ends_the_turn_untouched() {
    let low_ammo = GameState {
        bullets: 30,
        miles_traveled: 400,
        ..sturdy_state()
    };
    for seed in [3, 99, 0x1234_5678] {
        let mut journey = Journey::new(low_ammo.clone(), TrailRng::new(seed));
        let mut script = ScriptedDecisions::new().with_actions([TurnAction::Hunt]);

        assert_eq!(journey.run_turn(&mut script), Ok(TurnOutcome::Continue));

        let after = journey.state();
        assert_eq!(journey.rng().draws(), 0, "seed {seed}");
        assert_eq!(journey.rng().state(), seed);
        assert_eq!(after.food, low_ammo.food);
        assert_eq!(after.miles_traveled, low_ammo.miles_traveled);
        assert_eq!(after.bullets, low_ammo.bullets);
        assert_eq!(after.clothing, low_ammo.clothing);
        assert_eq!(after.misc_supplies, low_ammo.misc_supplies);
        assert_eq!(after.cash, low_ammo.cash);
        assert_eq!(after.oxen, low_ammo.oxen);
        assert_eq!(after.flags, low_ammo.flags);
        assert_eq!(after.turn_number, low_ammo.turn_number + 1);
        assert_eq!(after.fort, low_ammo.fort.toggled());
        assert!(journey.journal().any(|kind| matches!(
            kind,
            SignalKind::Hunted {
                outcome: oregon_game::HuntOutcome::Refused
            }
        )));
        assert!(!journey.journal().any(|kind| matches!(kind, SignalKind::Ate { .. })));
    }
}

#[test]
fn doctor_bill_without_cash_is_fatal() {
    let mut state = GameState {
        cash: 10,
        ..sturdy_state()
    };
    state.flags.insert(Flag::Illness);
    let mut journey = Journey::new(state, TrailRng::new(1));
    let mut script = ScriptedDecisions::new();
    assert_eq!(
        journey.run_turn(&mut script),
        Ok(TurnOutcome::Died(DeathCause::Disease))
    );
    assert_eq!(journey.state().cash, 0);
    assert_eq!(journey.rng().draws(), 0);
}

#[test]
fn finished_runs_reject_further_turns() {
    let state = GameState {
        food: 5,
        ..sturdy_state()
    };
    let mut journey = Journey::new(state, TrailRng::new(1));
    let mut script = ScriptedDecisions::new();
    let outcome = journey.run_turn(&mut script).unwrap();
    assert_eq!(outcome, TurnOutcome::Died(DeathCause::Starvation));

    let before = journey.clone();
    assert_eq!(
        journey.run_turn(&mut script),
        Err(JourneyError::Finished(outcome))
    );
    assert_eq!(journey.state(), before.state());
    assert_eq!(journey.rng(), before.rng());
    assert_eq!(journey.journal().len(), before.journal().len());
}

#[test]
fn every_draw_lands_inside_its_event_band() {
    for draw in 0..100 {
        let event = HazardEvent::select(draw);
        let idx = HazardEvent::ALL
            .iter()
            .position(|candidate| *candidate == event)
            .unwrap();
        let floor = if idx == 0 {
            -1
        } else {
            HazardEvent::ALL[idx - 1].threshold()
        };
        assert!(
            floor < draw && draw <= event.threshold(),
            "draw {draw} picked {event:?} with band ({floor}, {}]",
            event.threshold()
        );
    }
}
