//! Rider encounters: a distance-scaled gate, a two-draw hostility roll,
//! and the tactic matrix.

use serde::{Deserialize, Serialize};

use crate::constants::{
    RIDER_DRAW_SCALE, RIDER_FLIP_THRESHOLD, RIDER_FRIENDLY_CHANCE, RIDER_GATE_CENTER,
    RIDER_GATE_FLOOR, RIDER_GATE_OFFSET, RIDER_HOLD_FIRE_THRESHOLD,
};
use crate::journey::{SignalKind, TurnContext};
use crate::numbers::hundreds_of_miles;
use crate::skill;
use crate::state::Flag;
use crate::terminal::{self, Survival};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiderTactic {
    Run,
    Attack,
    Continue,
    CircleWagons,
}

impl RiderTactic {
    pub const ALL: [Self; 4] = [Self::Run, Self::Attack, Self::Continue, Self::CircleWagons];

    /// Map a 1-based menu answer. Out-of-range answers fall back to the last option.
    #[must_use]
    pub const fn from_choice(choice: i32) -> Self {
        match choice {
            1 => Self::Run,
            2 => Self::Attack,
            3 => Self::Continue,
            _ => Self::CircleWagons,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Attack => "attack",
            Self::Continue => "continue",
            Self::CircleWagons => "circle wagons",
        }
    }
}

/// How a shoot-out with hostile riders went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FightResult {
    DroveOff,
    SlowDraw,
    Knifed,
}

impl FightResult {
    #[must_use]
    pub const fn ui_key(self) -> &'static str {
        match self {
            Self::DroveOff => "log.riders.drove-off",
            Self::SlowDraw => "log.riders.slow-draw",
            Self::Knifed => "log.riders.knifed",
        }
    }

    #[must_use]
    pub const fn from_grade(grade: i32) -> Self {
        if grade <= 1 {
            Self::DroveOff
        } else if grade <= 4 {
            Self::SlowDraw
        } else {
            Self::Knifed
        }
    }
}

/// Gate value `c`; riders appear when `unit*10 <= c`.
#[must_use]
pub fn rider_chance(miles: i32) -> f64 {
    let a = (hundreds_of_miles(miles) - RIDER_GATE_CENTER).powi(2) + RIDER_GATE_OFFSET;
    a / (a - RIDER_GATE_FLOOR) - 1.0
}

/// Two-draw hostility roll: friendly unless the first draw says otherwise,
/// then flipped when the second clears the threshold.
#[must_use]
pub fn hostility(first: f64, second: f64) -> bool {
    let hostile = first >= RIDER_FRIENDLY_CHANCE;
    if second > RIDER_FLIP_THRESHOLD {
        !hostile
    } else {
        hostile
    }
}

/// Roll for riders and resolve the encounter.
///
/// # Errors
///
/// Returns [`crate::DeathCause::Massacre`] when the party runs out of bullets.
pub fn check_for_riders(ctx: &mut TurnContext<'_>) -> Survival {
    let gate = rider_chance(ctx.state.miles_traveled);
    let draw = ctx.rng.next_unit() * RIDER_DRAW_SCALE;
    if draw > gate {
        return Ok(());
    }

    let first = ctx.rng.next_unit();
    let second = ctx.rng.next_unit();
    let hostile = hostility(first, second);
    log::trace!("riders at mile {}: hostile={hostile}", ctx.state.miles_traveled);
    ctx.emit(SignalKind::RidersAhead { hostile });

    let status = ctx.state.snapshot();
    let tactic = ctx.decisions.rider_tactic(&status, hostile);
    ctx.emit(SignalKind::RiderTacticChosen { tactic });

    if hostile {
        if !resolve_hostile(ctx, tactic) {
            ctx.emit(SignalKind::RidersHeldFire);
            return Ok(());
        }
    } else {
        resolve_friendly(ctx, tactic);
    }
    ctx.emit(SignalKind::RidersDeparted { hostile });
    terminal::check_massacre(ctx.state)
}

fn resolve_friendly(ctx: &mut TurnContext<'_>, tactic: RiderTactic) {
    let state = &mut *ctx.state;
    match tactic {
        RiderTactic::Run => {
            state.advance(15);
            state.oxen -= 10;
        }
        RiderTactic::Attack => {
            state.retreat(5);
            state.bullets -= 100;
        }
        RiderTactic::Continue => {}
        RiderTactic::CircleWagons => state.retreat(20),
    }
}

/// Returns `false` when the riders held their fire.
fn resolve_hostile(ctx: &mut TurnContext<'_>, tactic: RiderTactic) -> bool {
    match tactic {
        RiderTactic::Run => {
            let state = &mut *ctx.state;
            state.advance(20);
            state.misc_supplies -= 15;
            state.bullets -= 150;
            state.oxen -= 40;
        }
        RiderTactic::Attack => {
            let grade = skill::shooting_check(ctx).value();
            ctx.state.bullets -= grade * 40 + 80;
            let result = FightResult::from_grade(grade);
            if result == FightResult::Knifed {
                ctx.state.flags.insert(Flag::Injury);
            }
            ctx.emit(SignalKind::RiderFight { result });
        }
        RiderTactic::Continue => {
            if ctx.rng.next_unit() > RIDER_HOLD_FIRE_THRESHOLD {
                return false;
            }
            ctx.state.bullets -= 150;
            ctx.state.misc_supplies -= 15;
        }
        RiderTactic::CircleWagons => {
            let grade = skill::shooting_check(ctx).value();
            ctx.state.bullets -= grade * 30 + 80;
            ctx.state.retreat(25);
        }
    }
    true
}
