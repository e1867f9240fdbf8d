//! Hunting for food along the trail.

use serde::{Deserialize, Serialize};

use crate::constants::{
    HUNT_BASE_BULLETS, HUNT_BIG_GAME_FOOD, HUNT_BULLETS_PER_GRADE, HUNT_CATCH_FOOD,
    HUNT_FOOD_PER_GRADE, HUNT_MIN_BULLETS, HUNT_MISS_PCT_PER_GRADE,
};
use crate::journey::{SignalKind, TurnContext};
use crate::numbers::i32_to_f64;
use crate::skill;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "result")]
pub enum HuntOutcome {
    /// Fewer than the minimum bullets; nothing happened.
    Refused,
    BigGame { food: i32, bullets_spent: i32 },
    Missed { bullets_spent: i32 },
    Caught { food: i32, bullets_spent: i32 },
}

impl HuntOutcome {
    #[must_use]
    pub const fn ui_key(self) -> &'static str {
        match self {
            Self::Refused => "log.hunt.refused",
            Self::BigGame { .. } => "log.hunt.big-game",
            Self::Missed { .. } => "log.hunt.missed",
            Self::Caught { .. } => "log.hunt.caught",
        }
    }

    #[must_use]
    pub const fn food(self) -> i32 {
        match self {
            Self::BigGame { food, .. } | Self::Caught { food, .. } => food,
            Self::Refused | Self::Missed { .. } => 0,
        }
    }

    #[must_use]
    pub const fn bullets_spent(self) -> i32 {
        match self {
            Self::BigGame { bullets_spent, .. }
            | Self::Missed { bullets_spent }
            | Self::Caught { bullets_spent, .. } => bullets_spent,
            Self::Refused => 0,
        }
    }
}

/// Whether the party carries enough ammunition to hunt.
#[must_use]
pub const fn can_hunt(bullets: i32) -> bool {
    bullets >= HUNT_MIN_BULLETS
}

/// Hunt once. Refusal touches neither the state nor the generator.
pub fn go_hunting(ctx: &mut TurnContext<'_>) -> HuntOutcome {
    if !can_hunt(ctx.state.bullets) {
        ctx.emit(SignalKind::Hunted {
            outcome: HuntOutcome::Refused,
        });
        return HuntOutcome::Refused;
    }

    let grade = skill::shooting_check(ctx).value();
    let outcome = if grade <= 1 {
        let food = HUNT_BIG_GAME_FOOD + ctx.rng.next_int(0, 6);
        let bullets_spent = HUNT_BASE_BULLETS + ctx.rng.next_int(0, 4);
        HuntOutcome::BigGame {
            food,
            bullets_spent,
        }
    } else if ctx.rng.next_unit() * 100.0 < i32_to_f64(HUNT_MISS_PCT_PER_GRADE * grade) {
        HuntOutcome::Missed {
            bullets_spent: HUNT_BASE_BULLETS + HUNT_BULLETS_PER_GRADE * grade,
        }
    } else {
        HuntOutcome::Caught {
            food: HUNT_CATCH_FOOD - HUNT_FOOD_PER_GRADE * grade,
            bullets_spent: HUNT_BASE_BULLETS + HUNT_BULLETS_PER_GRADE * grade,
        }
    };

    ctx.state.food += outcome.food();
    ctx.state.bullets -= outcome.bullets_spent();
    log::debug!("hunt at grade {grade}: {outcome:?}");
    ctx.emit(SignalKind::Hunted { outcome });
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey::{Journal, ScriptedDecisions};
    use crate::rng::TrailRng;
    use crate::state::{GameState, ShootingSkill};

    #[test]
    fn low_ammunition_refuses_without_drawing() {
        let mut state = GameState {
            bullets: 39,
            food: 50,
            ..GameState::default()
        };
        let before = state.clone();
        let mut rng = TrailRng::new(42);
        let mut script = ScriptedDecisions::new();
        let mut journal = Journal::new();
        let mut ctx = TurnContext::new(&mut state, &mut rng, &mut script, &mut journal);
        assert_eq!(go_hunting(&mut ctx), HuntOutcome::Refused);
        assert_eq!(state, before);
        assert_eq!(rng.draws(), 0);
        assert_eq!(rng.state(), 42);
    }

    #[test]
    fn clean_shot_bags_big_game() {
        let mut state = GameState {
            bullets: 100,
            shooting_skill: ShootingSkill::AceMarksman,
            ..GameState::default()
        };
        let mut rng = TrailRng::new(7);
        let mut script = ScriptedDecisions::new().with_shots([true]);
        let mut journal = Journal::new();
        let mut ctx = TurnContext::new(&mut state, &mut rng, &mut script, &mut journal);
        let outcome = go_hunting(&mut ctx);
        let HuntOutcome::BigGame {
            food,
            bullets_spent,
        } = outcome
        else {
            panic!("expected big game, got {outcome:?}");
        };
        assert!((52..=58).contains(&food));
        assert!((10..=14).contains(&bullets_spent));
        assert_eq!(state.food, food);
        assert_eq!(state.bullets, 100 - bullets_spent);
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn missed_word_costs_thirty_seven_bullets_or_yields_thirty() {
        let mut state = GameState {
            bullets: 100,
            ..GameState::default()
        };
        let mut rng = TrailRng::new(11);
        let mut script = ScriptedDecisions::new().with_shots([false]);
        let mut journal = Journal::new();
        let mut ctx = TurnContext::new(&mut state, &mut rng, &mut script, &mut journal);
        let outcome = go_hunting(&mut ctx);
        assert_eq!(outcome.bullets_spent(), 37);
        assert!(matches!(
            outcome,
            HuntOutcome::Missed { .. } | HuntOutcome::Caught { food: 30, .. }
        ));
        assert_eq!(rng.draws(), 2);
    }
}
