use log::{debug, info};

use crate::journey::{
    DecisionSource, Journal, JourneyError, SignalKind, TurnContext, play_turn, settle_turn,
};
use crate::outfit::{InitialPurchases, OutfitError};
use crate::rng::{SeedSource, TrailRng};
use crate::state::{GameState, StatusSnapshot};
use crate::terminal::{self, TurnOutcome};

/// High-level run wrapper binding the state, its generator, and the journal.
#[derive(Debug, Clone)]
pub struct Journey {
    state: GameState,
    rng: TrailRng,
    journal: Journal,
    outcome: Option<TurnOutcome>,
}

impl Journey {
    /// Bind an existing state to a generator.
    #[must_use]
    pub fn new(state: GameState, rng: TrailRng) -> Self {
        Self {
            state,
            rng,
            journal: Journal::new(),
            outcome: None,
        }
    }

    /// Outfit a fresh party and seed its generator.
    ///
    /// # Errors
    ///
    /// Returns an error if the purchases exceed the available money.
    pub fn outfit(purchases: &InitialPurchases, seed: SeedSource) -> Result<Self, OutfitError> {
        let state = purchases.outfit()?;
        let rng = seed.into_rng();
        info!("new journey seeded with {:#010x}", rng.state());
        Ok(Self::new(state, rng))
    }

    /// Advance the simulation by one turn.
    ///
    /// The terminal outcome is returned exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`JourneyError::Finished`] if the run has already ended; the
    /// state and generator are left untouched.
    pub fn run_turn(
        &mut self,
        decisions: &mut dyn DecisionSource,
    ) -> Result<TurnOutcome, JourneyError> {
        if let Some(done) = self.outcome {
            return Err(JourneyError::Finished(done));
        }

        let outcome = match terminal::boundary_outcome(&self.state) {
            Some(outcome) => outcome,
            None => {
                let mut ctx = TurnContext::new(
                    &mut self.state,
                    &mut self.rng,
                    decisions,
                    &mut self.journal,
                );
                let survival = play_turn(&mut ctx);
                settle_turn(ctx.state, survival)
            }
        };

        if outcome.is_terminal() {
            self.finish(outcome, decisions);
        }
        Ok(outcome)
    }

    /// Play turns until the run ends.
    pub fn play_to_end(&mut self, decisions: &mut dyn DecisionSource) -> TurnOutcome {
        loop {
            match self.run_turn(decisions) {
                Ok(TurnOutcome::Continue) => {}
                Ok(outcome) | Err(JourneyError::Finished(outcome)) => return outcome,
            }
        }
    }

    fn finish(&mut self, outcome: TurnOutcome, decisions: &mut dyn DecisionSource) {
        let kind = match outcome {
            TurnOutcome::Died(cause) => SignalKind::Died { cause },
            TurnOutcome::Won(arrival) => SignalKind::Arrived { arrival },
            TurnOutcome::Continue => return,
        };
        debug!(
            "journey over on turn {} at mile {}: {outcome:?}",
            self.state.turn_number, self.state.miles_traveled
        );
        let signal = self.journal.push(self.state.turn_number, kind);
        decisions.observe(&signal);
        self.outcome = Some(outcome);
    }

    /// Status view for rendering.
    #[must_use]
    pub fn status(&self) -> StatusSnapshot {
        self.state.snapshot()
    }

    /// Borrow the underlying game state.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Borrow the generator.
    #[must_use]
    pub const fn rng(&self) -> &TrailRng {
        &self.rng
    }

    #[must_use]
    pub const fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Terminal outcome, once reached.
    #[must_use]
    pub const fn outcome(&self) -> Option<TurnOutcome> {
        self.outcome
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Consume the journey, returning the final state.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey::ScriptedDecisions;
    use crate::terminal::DeathCause;

    fn sturdy_state() -> GameState {
        GameState {
            food: 400,
            bullets: 2_000,
            clothing: 100,
            misc_supplies: 100,
            cash: 200,
            oxen: 300,
            ..GameState::default()
        }
    }

    #[test]
    fn terminal_outcome_is_reported_once() {
        let state = GameState {
            turn_number: 20,
            miles_traveled: 1_500,
            ..sturdy_state()
        };
        let mut journey = Journey::new(state.clone(), TrailRng::new(5));
        let mut script = ScriptedDecisions::new();

        let outcome = journey.run_turn(&mut script).expect("first call");
        assert_eq!(outcome, TurnOutcome::Died(DeathCause::WinterBlizzard));
        assert_eq!(
            journey.run_turn(&mut script),
            Err(JourneyError::Finished(outcome))
        );
        assert_eq!(journey.state(), &state);
        assert_eq!(journey.rng().draws(), 0);
        assert!(journey.is_over());
    }

    #[test]
    fn outfitting_seeds_the_generator() {
        let purchases = InitialPurchases {
            oxen: 250,
            food: 200,
            ammunition: 20,
            clothing: 50,
            misc_supplies: 50,
            ..InitialPurchases::default()
        };
        let journey = Journey::outfit(&purchases, SeedSource::Fixed(77)).expect("valid outfit");
        assert_eq!(journey.rng().state(), 77);
        assert_eq!(journey.state().cash, 130);
        assert_eq!(journey.status().bullets, 1_000);
    }

    #[test]
    fn play_to_end_always_terminates() {
        let mut journey = Journey::new(sturdy_state(), TrailRng::new(0xBEEF));
        let mut script = ScriptedDecisions::new();
        let outcome = journey.play_to_end(&mut script);
        assert!(outcome.is_terminal());
        assert!(journey.state().turn_number <= 20);
        let last = journey.journal().entries().last().expect("signals");
        assert!(matches!(
            last.kind,
            SignalKind::Died { .. } | SignalKind::Arrived { .. }
        ));
        assert_eq!(script.observed().len(), journey.journal().len());
    }
}
