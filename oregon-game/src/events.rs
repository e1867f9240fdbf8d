//! The random hazard table rolled once per travel segment.

use serde::{Deserialize, Serialize};

use crate::constants::{EVENT_DRAW_SCALE, EVENT_THRESHOLDS, HUNT_MIN_BULLETS, MOUNTAIN_START};
use crate::health;
use crate::journey::{SignalKind, TurnContext};
use crate::numbers::trunc_f64_to_i32;
use crate::skill;
use crate::state::Flag;
use crate::terminal::{self, DeathCause, Survival};

/// One of the sixteen trail hazards, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardEvent {
    WagonBreakdown,
    OxInjury,
    DaughterBreaksArm,
    OxWandersOff,
    SonGetsLost,
    UnsafeWater,
    HeavyRains,
    BanditsAttack,
    FireInWagon,
    LoseWayInFog,
    PoisonousSnake,
    WagonSwampedFording,
    WildAnimalsAttack,
    ColdWeather,
    HailStorm,
    HelpfulIndians,
}

impl HazardEvent {
    pub const ALL: [Self; 16] = [
        Self::WagonBreakdown,
        Self::OxInjury,
        Self::DaughterBreaksArm,
        Self::OxWandersOff,
        Self::SonGetsLost,
        Self::UnsafeWater,
        Self::HeavyRains,
        Self::BanditsAttack,
        Self::FireInWagon,
        Self::LoseWayInFog,
        Self::PoisonousSnake,
        Self::WagonSwampedFording,
        Self::WildAnimalsAttack,
        Self::ColdWeather,
        Self::HailStorm,
        Self::HelpfulIndians,
    ];

    /// Pick the first event whose cumulative threshold covers `draw`.
    /// Draws past the last threshold land on the final event.
    #[must_use]
    pub fn select(draw: i32) -> Self {
        EVENT_THRESHOLDS
            .iter()
            .position(|&threshold| draw <= threshold)
            .map_or(Self::HelpfulIndians, |idx| Self::ALL[idx])
    }

    /// Inclusive upper bound of the draws selecting this event.
    #[must_use]
    pub fn threshold(self) -> i32 {
        Self::ALL
            .iter()
            .position(|&event| event == self)
            .and_then(|idx| EVENT_THRESHOLDS.get(idx).copied())
            .unwrap_or(99)
    }

    #[must_use]
    pub const fn ui_key(self) -> &'static str {
        match self {
            Self::WagonBreakdown => "log.event.wagon-breakdown",
            Self::OxInjury => "log.event.ox-injury",
            Self::DaughterBreaksArm => "log.event.daughter-breaks-arm",
            Self::OxWandersOff => "log.event.ox-wanders-off",
            Self::SonGetsLost => "log.event.son-gets-lost",
            Self::UnsafeWater => "log.event.unsafe-water",
            Self::HeavyRains => "log.event.heavy-rains",
            Self::BanditsAttack => "log.event.bandits-attack",
            Self::FireInWagon => "log.event.fire-in-wagon",
            Self::LoseWayInFog => "log.event.lose-way-in-fog",
            Self::PoisonousSnake => "log.event.poisonous-snake",
            Self::WagonSwampedFording => "log.event.wagon-swamped-fording",
            Self::WildAnimalsAttack => "log.event.wild-animals-attack",
            Self::ColdWeather => "log.event.cold-weather",
            Self::HailStorm => "log.event.hail-storm",
            Self::HelpfulIndians => "log.event.helpful-indians",
        }
    }

    /// Region-bound events only fire on their side of the mountain line.
    #[must_use]
    pub const fn applies_at(self, miles: i32) -> bool {
        match self {
            Self::HeavyRains => miles <= MOUNTAIN_START,
            Self::ColdWeather => miles > MOUNTAIN_START,
            _ => true,
        }
    }
}

/// Draw and resolve this segment's event.
///
/// # Errors
///
/// Returns the [`DeathCause`] when the event proves fatal.
pub fn process_random_events(ctx: &mut TurnContext<'_>) -> Survival {
    let draw = trunc_f64_to_i32(ctx.rng.next_unit() * EVENT_DRAW_SCALE);
    let event = HazardEvent::select(draw);
    log::trace!("event draw {draw} selects {event:?}");
    resolve_event(ctx, event)
}

/// Apply one event's formula to the ledger.
///
/// # Errors
///
/// Returns the [`DeathCause`] when the event proves fatal.
pub fn resolve_event(ctx: &mut TurnContext<'_>, event: HazardEvent) -> Survival {
    if !event.applies_at(ctx.state.miles_traveled) {
        return Ok(());
    }
    ctx.emit(SignalKind::Hazard { event });

    match event {
        HazardEvent::WagonBreakdown => {
            let lost = 15 + ctx.rng.next_int(1, 5) * 5;
            ctx.state.retreat(lost);
            ctx.state.misc_supplies -= 8;
        }
        HazardEvent::OxInjury => {
            ctx.state.retreat(25);
            ctx.state.oxen -= 20;
        }
        HazardEvent::DaughterBreaksArm => {
            let lost = 5 + ctx.rng.next_int(1, 4) * 4;
            ctx.state.retreat(lost);
            ctx.state.misc_supplies -= 2 + ctx.rng.next_int(1, 3) * 3;
        }
        HazardEvent::OxWandersOff => ctx.state.retreat(17),
        HazardEvent::SonGetsLost => ctx.state.retreat(10),
        HazardEvent::UnsafeWater => {
            let lost = ctx.rng.next_int(1, 10) * 10 + 2;
            ctx.state.retreat(lost);
        }
        HazardEvent::HeavyRains => {
            ctx.state.food -= 10;
            ctx.state.bullets -= 500;
            ctx.state.misc_supplies -= 15;
            let lost = ctx.rng.next_int(1, 10) * 10 + 5;
            ctx.state.retreat(lost);
        }
        HazardEvent::BanditsAttack => bandits(ctx),
        HazardEvent::FireInWagon => {
            ctx.state.food -= 40;
            ctx.state.bullets -= 400;
            ctx.state.misc_supplies -= ctx.rng.next_int(1, 8) * 8 + 3;
            ctx.state.retreat(15);
        }
        HazardEvent::LoseWayInFog => {
            let lost = 10 + ctx.rng.next_int(1, 5) * 5;
            ctx.state.retreat(lost);
        }
        HazardEvent::PoisonousSnake => {
            ctx.state.bullets -= 10;
            ctx.state.misc_supplies -= 5;
            return terminal::check_medicine(ctx.state, DeathCause::Snakebite);
        }
        HazardEvent::WagonSwampedFording => {
            ctx.state.food -= 30;
            ctx.state.clothing -= 20;
            let lost = 20 + ctx.rng.next_int(1, 20) * 20;
            ctx.state.retreat(lost);
        }
        HazardEvent::WildAnimalsAttack => return wild_animals(ctx),
        HazardEvent::ColdWeather => {
            let warm = ctx.state.clothing > 22 + ctx.rng.next_int(1, 4) * 4;
            ctx.emit(SignalKind::ColdWeather { warm });
            if !warm {
                return health::resolve_illness(ctx);
            }
        }
        HazardEvent::HailStorm => {
            let lost = 5 + ctx.rng.next_int(1, 10) * 10;
            ctx.state.retreat(lost);
            ctx.state.bullets -= 200;
            ctx.state.misc_supplies -= 4 + ctx.rng.next_int(1, 3) * 3;
        }
        HazardEvent::HelpfulIndians => ctx.state.food += 14,
    }
    Ok(())
}

fn bandits(ctx: &mut TurnContext<'_>) {
    let grade = skill::shooting_check(ctx).value();
    ctx.state.bullets -= 20 * grade;
    if ctx.state.bullets < 0 {
        ctx.state.cash /= 3;
        ctx.emit(SignalKind::BanditsTookCash {
            cash_left: ctx.state.cash,
        });
    } else if grade <= 1 {
        ctx.emit(SignalKind::BanditsRepelled);
    } else {
        ctx.state.flags.insert(Flag::Injury);
        ctx.state.misc_supplies -= 5;
        ctx.state.oxen -= 20;
        ctx.emit(SignalKind::BanditsWounded);
    }
}

fn wild_animals(ctx: &mut TurnContext<'_>) -> Survival {
    let grade = skill::shooting_check(ctx).value();
    if ctx.state.bullets < HUNT_MIN_BULLETS {
        ctx.state.flags.insert(Flag::Injury);
        ctx.emit(SignalKind::AnimalsOverpowered);
        return health::resolve_illness(ctx);
    }
    ctx.state.bullets -= 20 * grade;
    ctx.state.clothing -= 4 * grade;
    ctx.state.food -= 8 * grade;
    ctx.emit(SignalKind::AnimalsFought { clean: grade <= 2 });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey::{Journal, ScriptedDecisions};
    use crate::rng::TrailRng;
    use crate::state::GameState;

    #[test]
    fn every_draw_selects_exactly_one_event() {
        let mut seen = std::collections::HashSet::new();
        for draw in 0..100 {
            seen.insert(HazardEvent::select(draw));
        }
        assert_eq!(seen.len(), HazardEvent::ALL.len());
        assert_eq!(HazardEvent::select(0), HazardEvent::WagonBreakdown);
        assert_eq!(HazardEvent::select(6), HazardEvent::WagonBreakdown);
        assert_eq!(HazardEvent::select(7), HazardEvent::OxInjury);
        assert_eq!(HazardEvent::select(95), HazardEvent::HailStorm);
        assert_eq!(HazardEvent::select(96), HazardEvent::HelpfulIndians);
        assert_eq!(HazardEvent::select(99), HazardEvent::HelpfulIndians);
    }

    #[test]
    fn thresholds_follow_table_order() {
        assert_eq!(HazardEvent::WagonBreakdown.threshold(), 6);
        assert_eq!(HazardEvent::HailStorm.threshold(), 95);
        assert_eq!(HazardEvent::HelpfulIndians.threshold(), 99);
        for event in HazardEvent::ALL {
            assert_eq!(HazardEvent::select(event.threshold()), event);
        }
    }

    fn ctx_parts(state: GameState) -> (GameState, TrailRng, ScriptedDecisions, Journal) {
        (state, TrailRng::new(1234), ScriptedDecisions::new(), Journal::new())
    }

    #[test]
    fn heavy_rain_skipped_in_mountains() {
        let (mut state, mut rng, mut script, mut journal) = ctx_parts(GameState {
            miles_traveled: 1_000,
            food: 100,
            ..GameState::default()
        });
        let mut ctx = TurnContext::new(&mut state, &mut rng, &mut script, &mut journal);
        assert_eq!(resolve_event(&mut ctx, HazardEvent::HeavyRains), Ok(()));
        assert_eq!(state.food, 100);
        assert_eq!(rng.draws(), 0);
        assert!(journal.is_empty());
    }

    #[test]
    fn snakebite_without_medicine_is_fatal() {
        let (mut state, mut rng, mut script, mut journal) = ctx_parts(GameState {
            misc_supplies: 4,
            bullets: 50,
            ..GameState::default()
        });
        let mut ctx = TurnContext::new(&mut state, &mut rng, &mut script, &mut journal);
        assert_eq!(
            resolve_event(&mut ctx, HazardEvent::PoisonousSnake),
            Err(DeathCause::Snakebite)
        );
        assert_eq!(state.bullets, 40);
    }

    #[test]
    fn bandits_take_cash_when_bullets_run_out() {
        let (mut state, mut rng, mut script, mut journal) = ctx_parts(GameState {
            bullets: 100,
            cash: 90,
            ..GameState::default()
        });
        script = script.with_shots([false]);
        let mut ctx = TurnContext::new(&mut state, &mut rng, &mut script, &mut journal);
        assert_eq!(resolve_event(&mut ctx, HazardEvent::BanditsAttack), Ok(()));
        assert_eq!(state.bullets, -80);
        assert_eq!(state.cash, 30);
        assert!(!state.has_flag(Flag::Injury));
    }

    #[test]
    fn starving_for_bullets_lets_animals_injure() {
        let (mut state, mut rng, mut script, mut journal) = ctx_parts(GameState {
            bullets: 30,
            misc_supplies: 50,
            food: 60,
            ..GameState::default()
        });
        let mut ctx = TurnContext::new(&mut state, &mut rng, &mut script, &mut journal);
        assert_eq!(resolve_event(&mut ctx, HazardEvent::WildAnimalsAttack), Ok(()));
        assert!(state.has_flag(Flag::Injury));
        assert_eq!(state.bullets, 30);
        assert_eq!(state.food, 60);
        // word draw, then the illness roll
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn helpful_indians_bring_food() {
        let (mut state, mut rng, mut script, mut journal) = ctx_parts(GameState::default());
        let mut ctx = TurnContext::new(&mut state, &mut rng, &mut script, &mut journal);
        assert_eq!(resolve_event(&mut ctx, HazardEvent::HelpfulIndians), Ok(()));
        assert_eq!(state.food, 14);
    }
}
