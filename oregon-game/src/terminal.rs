//! Terminal-condition evaluation: death causes, victory, and turn outcomes.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calendar::ArrivalDate;
use crate::constants::{LOW_FOOD_THRESHOLD, MAX_TURNS, TOTAL_DISTANCE};
use crate::state::GameState;

/// Why the party perished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    Starvation,
    Exhaustion,
    Disease,
    Injuries,
    WinterBlizzard,
    Snakebite,
    Massacre,
}

impl DeathCause {
    pub const ALL: [Self; 7] = [
        Self::Starvation,
        Self::Exhaustion,
        Self::Disease,
        Self::Injuries,
        Self::WinterBlizzard,
        Self::Snakebite,
        Self::Massacre,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Starvation => "starvation",
            Self::Exhaustion => "exhaustion",
            Self::Disease => "disease",
            Self::Injuries => "injuries",
            Self::WinterBlizzard => "winter_blizzard",
            Self::Snakebite => "snakebite",
            Self::Massacre => "massacre",
        }
    }
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Result of a single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum TurnOutcome {
    Continue,
    Died(DeathCause),
    Won(ArrivalDate),
}

impl TurnOutcome {
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Continue)
    }

    #[must_use]
    pub const fn death_cause(&self) -> Option<DeathCause> {
        match self {
            Self::Died(cause) => Some(*cause),
            _ => None,
        }
    }
}

/// Progress of a turn's hazard pipeline: `Err` carries the fatal cause and
/// stops every later step through `?`.
pub type Survival = Result<(), DeathCause>;

/// Starvation gate checked before the party sets out.
///
/// # Errors
///
/// Returns [`DeathCause::Starvation`] when food cannot cover a poor ration.
pub const fn check_starvation(state: &GameState) -> Survival {
    if state.food < LOW_FOOD_THRESHOLD {
        return Err(DeathCause::Starvation);
    }
    Ok(())
}

/// Riders and bandits leave the party defenceless once bullets run negative.
///
/// # Errors
///
/// Returns [`DeathCause::Massacre`] when bullets are below zero.
pub const fn check_massacre(state: &GameState) -> Survival {
    if state.bullets < 0 {
        return Err(DeathCause::Massacre);
    }
    Ok(())
}

/// Medicine exhausted during an illness or snakebite.
///
/// # Errors
///
/// Returns `cause` when misc supplies are below zero.
pub const fn check_medicine(state: &GameState, cause: DeathCause) -> Survival {
    if state.misc_supplies < 0 {
        return Err(cause);
    }
    Ok(())
}

/// Victory or winter death evaluated on a turn boundary.
///
/// Arrival wins over the calendar: a party that reaches Oregon City on the
/// final turn survives.
#[must_use]
pub fn boundary_outcome(state: &GameState) -> Option<TurnOutcome> {
    if state.miles_traveled >= TOTAL_DISTANCE {
        return Some(TurnOutcome::Won(ArrivalDate::interpolate(
            state.turn_number,
            state.miles_previous_turn,
            state.miles_traveled,
        )));
    }
    if state.turn_number >= MAX_TURNS {
        return Some(TurnOutcome::Died(DeathCause::WinterBlizzard));
    }
    None
}
