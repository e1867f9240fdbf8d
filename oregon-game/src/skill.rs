//! Shooting mini-check shared by hunting, riders, bandits and wild animals.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{SHOT_BEST, SHOT_MISS, SHOT_SKILL_OFFSET};
use crate::journey::{SignalKind, TurnContext};
use crate::state::ShootingSkill;

/// Word the player is asked to type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotWord {
    Bang,
    Blam,
    Pow,
    Wham,
}

impl ShotWord {
    pub const ALL: [Self; 4] = [Self::Bang, Self::Blam, Self::Pow, Self::Wham];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bang => "BANG",
            Self::Blam => "BLAM",
            Self::Pow => "POW",
            Self::Wham => "WHAM",
        }
    }

    /// Word for a draw in `0..=3`; anything else wraps.
    #[must_use]
    pub fn from_draw(draw: i32) -> Self {
        let idx = usize::try_from(draw.rem_euclid(4)).unwrap_or(0);
        Self::ALL[idx]
    }

    /// Case-insensitive comparison against typed input.
    #[must_use]
    pub fn matches(self, typed: &str) -> bool {
        typed.trim().eq_ignore_ascii_case(self.as_str())
    }
}

impl fmt::Display for ShotWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Graded result of a shot: 1 is best, 9 is a miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShotOutcome(i32);

impl ShotOutcome {
    pub const BEST: Self = Self(SHOT_BEST);
    pub const MISS: Self = Self(SHOT_MISS);

    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// A best-grade shot.
    #[must_use]
    pub const fn is_clean(self) -> bool {
        self.0 <= SHOT_BEST
    }
}

/// Grade a response: a correct answer scores `max(1, skill - 2)`, a wrong
/// one is a miss.
#[must_use]
pub const fn resolve_shot(skill: ShootingSkill, hit: bool) -> ShotOutcome {
    if !hit {
        return ShotOutcome::MISS;
    }
    let graded = skill.level() - SHOT_SKILL_OFFSET;
    if graded < SHOT_BEST {
        ShotOutcome::BEST
    } else {
        ShotOutcome(graded)
    }
}

/// Run the check: draw the target word, then ask the decision source.
pub fn shooting_check(ctx: &mut TurnContext<'_>) -> ShotOutcome {
    let word = ShotWord::from_draw(ctx.rng.next_int(0, 3));
    ctx.emit(SignalKind::ShotCalled { word });
    let hit = ctx.decisions.shot_response(word);
    let outcome = resolve_shot(ctx.state.shooting_skill, hit);
    log::trace!("shot {word} hit={hit} graded {}", outcome.value());
    outcome
}
