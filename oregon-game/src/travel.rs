//! One two-week travel segment.

use crate::constants::{BASE_TRAVEL, OXEN_BASELINE, OXEN_SPEED_DIVISOR};
use crate::events;
use crate::health;
use crate::journey::{SignalKind, TurnContext};
use crate::mountains;
use crate::riders;
use crate::terminal::{self, Survival};

/// Miles covered for an oxen investment and a `1..=10` pace draw.
#[must_use]
pub const fn travel_distance(oxen: i32, pace_draw: i32) -> i32 {
    BASE_TRAVEL + (oxen - OXEN_BASELINE) / OXEN_SPEED_DIVISOR + pace_draw * 10
}

/// Eat, move, then face riders, the event table and (past mile 950) the
/// mountains, in that order.
///
/// # Errors
///
/// Returns the [`crate::DeathCause`] of the first fatal hazard.
pub fn travel_segment(ctx: &mut TurnContext<'_>) -> Survival {
    terminal::check_starvation(ctx.state)?;
    health::eat(ctx)?;

    let miles = travel_distance(ctx.state.oxen, ctx.rng.next_int(1, 10));
    ctx.state.advance(miles);
    log::debug!(
        "turn {} covers {miles} miles, now at {}",
        ctx.state.turn_number,
        ctx.state.miles_traveled
    );
    ctx.emit(SignalKind::Traveled { miles });

    riders::check_for_riders(ctx)?;
    events::process_random_events(ctx)?;
    if ctx.state.in_mountains() {
        mountains::mountain_travel(ctx)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey::{Journal, ScriptedDecisions};
    use crate::rng::TrailRng;
    use crate::state::GameState;
    use crate::terminal::DeathCause;

    #[test]
    fn distance_truncates_toward_zero() {
        assert_eq!(travel_distance(220, 1), 210);
        assert_eq!(travel_distance(250, 10), 310);
        assert_eq!(travel_distance(200, 5), 244);
        assert_eq!(travel_distance(0, 1), 137);
    }

    #[test]
    fn starving_party_never_sets_out() {
        let mut state = GameState {
            food: 12,
            ..GameState::default()
        };
        let mut rng = TrailRng::default();
        let mut script = ScriptedDecisions::new();
        let mut journal = Journal::new();
        let mut ctx = TurnContext::new(&mut state, &mut rng, &mut script, &mut journal);
        assert_eq!(travel_segment(&mut ctx), Err(DeathCause::Starvation));
        assert_eq!(rng.draws(), 0);
        assert_eq!(state.food, 12);
    }
}
