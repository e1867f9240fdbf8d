//! Turn orchestration: owns the run's state, generator, and signal journal.

mod decisions;
mod session;
mod signal;

use log::{debug, trace};
use thiserror::Error;

use crate::calendar;
use crate::constants::STOP_MILEAGE_COST;
use crate::fort;
use crate::health;
use crate::hunt::{self, HuntOutcome};
use crate::rng::TrailRng;
use crate::state::GameState;
use crate::terminal::{self, Survival, TurnOutcome};
use crate::travel;

pub use decisions::{ActionMenu, DecisionSource, ScriptedDecisions, TurnAction};
pub use session::Journey;
pub use signal::{Journal, Severity, Signal, SignalId, SignalKind};

/// Failures surfaced by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum JourneyError {
    /// The run already ended; no further turns are valid.
    #[error("the journey already ended: {0:?}")]
    Finished(TurnOutcome),
}

/// Mutable view handed to every hazard resolver for the duration of a turn.
pub struct TurnContext<'a> {
    pub state: &'a mut GameState,
    pub rng: &'a mut TrailRng,
    pub decisions: &'a mut dyn DecisionSource,
    pub journal: &'a mut Journal,
}

impl<'a> TurnContext<'a> {
    pub fn new(
        state: &'a mut GameState,
        rng: &'a mut TrailRng,
        decisions: &'a mut dyn DecisionSource,
        journal: &'a mut Journal,
    ) -> Self {
        Self {
            state,
            rng,
            decisions,
            journal,
        }
    }

    /// Record a signal and forward it to the decision source.
    pub fn emit(&mut self, kind: SignalKind) {
        let signal = self.journal.push(self.state.turn_number, kind);
        trace!("turn {} signal {}", signal.id.turn, signal.ui_key());
        self.decisions.observe(&signal);
    }
}

/// Run one full turn: ledger checks, the player's action, then the travel
/// segment with its hazards.
///
/// # Errors
///
/// Returns the [`crate::DeathCause`] that ended the run mid-turn.
pub fn play_turn(ctx: &mut TurnContext<'_>) -> Survival {
    ctx.state.turn_number += 1;
    ctx.state.miles_previous_turn = ctx.state.miles_traveled;
    debug!(
        "turn {} begins at mile {}",
        ctx.state.turn_number, ctx.state.miles_traveled
    );
    ctx.emit(SignalKind::TurnStarted {
        date: calendar::turn_date(ctx.state.turn_number),
    });

    ctx.state.clamp_nonnegative();
    health::pay_doctor_bill(ctx)?;

    let status = ctx.state.snapshot();
    if status.low_food {
        ctx.emit(SignalKind::LowFood { food: status.food });
    }

    let menu = ActionMenu::for_fort(ctx.state.fort);
    let action = menu.coerce(ctx.decisions.turn_action(&status, menu));
    debug!("turn {} action {action:?}", ctx.state.turn_number);
    ctx.emit(SignalKind::ActionChosen { action });

    match action {
        TurnAction::StopAtFort => {
            fort::visit_fort(ctx);
            ctx.state.retreat(STOP_MILEAGE_COST);
        }
        TurnAction::Hunt => {
            if hunt::go_hunting(ctx) == HuntOutcome::Refused {
                // A refused hunt ends the turn on the spot: no meal, no travel.
                ctx.state.fort = ctx.state.fort.toggled();
                return Ok(());
            }
            ctx.state.retreat(STOP_MILEAGE_COST);
        }
        TurnAction::Continue => {}
    }

    travel::travel_segment(ctx)?;
    ctx.state.fort = ctx.state.fort.toggled();
    Ok(())
}

/// Resolve a turn's end: fatal causes first, then the boundary checks.
#[must_use]
pub fn settle_turn(state: &GameState, survival: Survival) -> TurnOutcome {
    match survival {
        Err(cause) => TurnOutcome::Died(cause),
        Ok(()) => terminal::boundary_outcome(state).unwrap_or(TurnOutcome::Continue),
    }
}
