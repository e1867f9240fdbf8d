//! Mountain crossing past mile 950: the rugged-terrain roll, the two
//! one-shot passes, and the blizzard fallback.

use serde::{Deserialize, Serialize};

use crate::constants::{
    BLIZZARD_CLOTHING_BASE, BLUE_MOUNTAINS_CHANCE, BLUE_MOUNTAINS_START, MOUNTAIN_DAMAGE_CHANCE,
    MOUNTAIN_GATE_CEILING, MOUNTAIN_GATE_CENTER, MOUNTAIN_GATE_DIVISOR_OFFSET,
    MOUNTAIN_GATE_OFFSET, MOUNTAIN_DRAW_SCALE, MOUNTAIN_LOST_CHANCE, MOUNTAIN_LOST_MILES,
    SLOW_GOING_BASE, SLOW_GOING_STEP, SOUTH_PASS_CHANCE,
};
use crate::health;
use crate::journey::{SignalKind, TurnContext};
use crate::numbers::{hundreds_of_miles, trunc_f64_to_i32};
use crate::state::Flag;
use crate::terminal::Survival;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MountainPass {
    SouthPass,
    BlueMountains,
}

impl MountainPass {
    #[must_use]
    pub const fn ui_key(self) -> &'static str {
        match self {
            Self::SouthPass => "log.mountains.south-pass",
            Self::BlueMountains => "log.mountains.blue-mountains",
        }
    }

    #[must_use]
    pub const fn flag(self) -> Flag {
        match self {
            Self::SouthPass => Flag::SouthPassCleared,
            Self::BlueMountains => Flag::BlueMountainsCleared,
        }
    }
}

/// Threshold the scaled draw must exceed for the mountains to bite.
#[must_use]
pub fn rugged_threshold(miles: i32) -> f64 {
    let b = (hundreds_of_miles(miles) - MOUNTAIN_GATE_CENTER).powi(2);
    MOUNTAIN_GATE_CEILING - (b + MOUNTAIN_GATE_OFFSET) / (b + MOUNTAIN_GATE_DIVISOR_OFFSET)
}

/// Resolve this segment's mountain crossing.
///
/// # Errors
///
/// Returns [`crate::DeathCause::Disease`] when blizzard exposure turns fatal.
pub fn mountain_travel(ctx: &mut TurnContext<'_>) -> Survival {
    let gate = rugged_threshold(ctx.state.miles_traveled);
    if ctx.rng.next_unit() * MOUNTAIN_DRAW_SCALE <= gate {
        log::trace!("mountains quiet at mile {}", ctx.state.miles_traveled);
        return Ok(());
    }
    ctx.emit(SignalKind::RuggedMountains);

    if ctx.rng.next_unit() <= MOUNTAIN_LOST_CHANCE {
        ctx.state.retreat(MOUNTAIN_LOST_MILES);
        ctx.emit(SignalKind::LostInMountains);
    } else if ctx.rng.next_unit() <= MOUNTAIN_DAMAGE_CHANCE {
        ctx.state.misc_supplies -= 5;
        ctx.state.bullets -= 200;
        let lost = 20 + ctx.rng.next_int(1, 30) * 30;
        ctx.state.retreat(lost);
        ctx.emit(SignalKind::MountainWagonDamage);
    } else {
        let lost = SLOW_GOING_BASE + trunc_f64_to_i32(ctx.rng.next_unit() / SLOW_GOING_STEP);
        ctx.state.retreat(lost);
        ctx.emit(SignalKind::SlowGoing { miles: lost });
    }

    cross_passes(ctx)
}

fn clear_pass(ctx: &mut TurnContext<'_>, pass: MountainPass) {
    ctx.state.flags.insert(pass.flag());
    log::debug!("{pass:?} cleared at mile {}", ctx.state.miles_traveled);
    ctx.emit(SignalKind::PassCleared { pass });
}

fn cross_passes(ctx: &mut TurnContext<'_>) -> Survival {
    if !ctx.state.has_flag(Flag::SouthPassCleared) && ctx.rng.next_unit() < SOUTH_PASS_CHANCE {
        clear_pass(ctx, MountainPass::SouthPass);
        return Ok(());
    }
    if ctx.state.miles_traveled >= BLUE_MOUNTAINS_START
        && !ctx.state.has_flag(Flag::BlueMountainsCleared)
        && ctx.rng.next_unit() < BLUE_MOUNTAINS_CHANCE
    {
        clear_pass(ctx, MountainPass::BlueMountains);
        return Ok(());
    }

    ctx.state.flags.insert(Flag::BlizzardHit);
    ctx.state.food -= 25;
    ctx.state.misc_supplies -= 10;
    ctx.state.bullets -= 300;
    let lost = 30 + ctx.rng.next_int(1, 40) * 40;
    ctx.state.retreat(lost);
    ctx.emit(SignalKind::Blizzard);

    if ctx.state.clothing < BLIZZARD_CLOTHING_BASE + ctx.rng.next_int(1, 2) * 2 {
        return health::resolve_illness(ctx);
    }
    Ok(())
}
