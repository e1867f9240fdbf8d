//! Eating, illness and the doctor's bill.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DOCTOR_BILL, ILLNESS_MEDICINE, ILLNESS_MILD_BASE, ILLNESS_MILD_PER_LEVEL,
    ILLNESS_MILEAGE_COST, ILLNESS_SERIOUS_BASE, ILLNESS_SERIOUS_SCALE, SERIOUS_ILLNESS_MEDICINE,
};
use crate::journey::{SignalKind, TurnContext};
use crate::numbers::i32_to_f64;
use crate::state::{EatingLevel, Flag};
use crate::terminal::{self, DeathCause, Survival};

/// Severity of a bout of illness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IllnessGrade {
    Mild,
    Bad,
    Serious,
}

impl IllnessGrade {
    #[must_use]
    pub const fn ui_key(self) -> &'static str {
        match self {
            Self::Mild => "log.illness.mild",
            Self::Bad => "log.illness.bad",
            Self::Serious => "log.illness.serious",
        }
    }

    /// Grade for a roll in `[0, 100)` at the given eating level.
    #[must_use]
    pub fn from_roll(roll: f64, level: EatingLevel) -> Self {
        if roll < mild_threshold(level) {
            Self::Mild
        } else if roll < serious_threshold(level) {
            Self::Bad
        } else {
            Self::Serious
        }
    }
}

/// Percent threshold `10 + 35*(level-1)`.
#[must_use]
pub fn mild_threshold(level: EatingLevel) -> f64 {
    i32_to_f64(ILLNESS_MILD_BASE + ILLNESS_MILD_PER_LEVEL * (level.level() - 1))
}

/// Percent threshold `100 - 40/4^(level-1)`.
#[must_use]
pub fn serious_threshold(level: EatingLevel) -> f64 {
    100.0 - ILLNESS_SERIOUS_SCALE / ILLNESS_SERIOUS_BASE.powi(level.level() - 1)
}

/// Charge the doctor when the party is ill or injured.
///
/// # Errors
///
/// Returns [`DeathCause::Disease`] when the bill cannot be paid.
pub fn pay_doctor_bill(ctx: &mut TurnContext<'_>) -> Survival {
    if !ctx.state.flags.needs_doctor() {
        return Ok(());
    }
    if !ctx.state.charge(DOCTOR_BILL) {
        ctx.emit(SignalKind::DoctorUnaffordable);
        return Err(DeathCause::Disease);
    }
    ctx.state.flags.remove(Flag::Illness);
    ctx.state.flags.remove(Flag::Injury);
    ctx.emit(SignalKind::DoctorBill {
        amount: DOCTOR_BILL,
    });
    Ok(())
}

/// Feed the party, then roll for illness.
///
/// # Errors
///
/// Returns [`DeathCause::Disease`] when an illness exhausts the medicine.
pub fn eat(ctx: &mut TurnContext<'_>) -> Survival {
    let status = ctx.state.snapshot();
    let requested = ctx.decisions.eating_level(&status);
    let (level, consumed) = ctx.state.ration_for(requested);
    if level != requested {
        ctx.emit(SignalKind::RationCut { requested });
    }
    ctx.state.eating_level = level;
    ctx.state.food -= consumed;
    ctx.emit(SignalKind::Ate { level, consumed });

    if level != EatingLevel::Poorly && ctx.rng.next_unit() * 100.0 < mild_threshold(level) {
        return Ok(());
    }
    if ctx.rng.next_unit() * 100.0 < serious_threshold(level) {
        return resolve_illness(ctx);
    }
    Ok(())
}

/// Apply one bout of illness graded by the current eating level.
///
/// # Errors
///
/// Returns [`DeathCause::Disease`] if misc supplies run out.
pub fn resolve_illness(ctx: &mut TurnContext<'_>) -> Survival {
    let roll = ctx.rng.next_unit() * 100.0;
    let grade = IllnessGrade::from_roll(roll, ctx.state.eating_level);
    match grade {
        IllnessGrade::Mild | IllnessGrade::Bad => {
            ctx.state.retreat(ILLNESS_MILEAGE_COST);
            ctx.state.misc_supplies -= ILLNESS_MEDICINE;
        }
        IllnessGrade::Serious => {
            ctx.state.misc_supplies -= SERIOUS_ILLNESS_MEDICINE;
            ctx.state.flags.insert(Flag::Illness);
        }
    }
    log::trace!("illness roll {roll:.2} graded {grade:?}");
    ctx.emit(SignalKind::Illness { grade });
    terminal::check_medicine(ctx.state, DeathCause::Disease)
}
