//! Decision points the engine asks its collaborator about.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::fort::FortOrder;
use crate::journey::Signal;
use crate::riders::RiderTactic;
use crate::skill::ShotWord;
use crate::state::{EatingLevel, FortAvailability, StatusSnapshot};

/// What the party does with the turn before travelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnAction {
    StopAtFort,
    Hunt,
    Continue,
}

/// Legal action set for the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionMenu {
    WithFort,
    WithoutFort,
}

impl ActionMenu {
    #[must_use]
    pub const fn for_fort(fort: FortAvailability) -> Self {
        if fort.is_available() {
            Self::WithFort
        } else {
            Self::WithoutFort
        }
    }

    #[must_use]
    pub const fn options(self) -> &'static [TurnAction] {
        match self {
            Self::WithFort => &[TurnAction::StopAtFort, TurnAction::Hunt, TurnAction::Continue],
            Self::WithoutFort => &[TurnAction::Hunt, TurnAction::Continue],
        }
    }

    /// Map a 1-based menu answer. Out-of-range answers fall back to the last option.
    #[must_use]
    pub fn from_choice(self, choice: i32) -> TurnAction {
        let options = self.options();
        usize::try_from(choice)
            .ok()
            .and_then(|idx| idx.checked_sub(1))
            .and_then(|idx| options.get(idx).copied())
            .unwrap_or(TurnAction::Continue)
    }

    /// Replace an action the menu does not offer with the last legal option.
    #[must_use]
    pub fn coerce(self, action: TurnAction) -> TurnAction {
        if self.options().contains(&action) {
            action
        } else {
            TurnAction::Continue
        }
    }
}

/// Injected input provider consulted at every decision point of a turn.
///
/// Calls are blocking and must return a definite answer; the engine never
/// times out or retries.
pub trait DecisionSource {
    /// Choose the turn's action from `menu`.
    fn turn_action(&mut self, status: &StatusSnapshot, menu: ActionMenu) -> TurnAction;

    /// Amounts to spend at the fort.
    fn fort_order(&mut self, status: &StatusSnapshot) -> FortOrder;

    /// How well to eat before travelling.
    fn eating_level(&mut self, status: &StatusSnapshot) -> EatingLevel;

    /// Response to riders. `hostile` is what the riders look like.
    fn rider_tactic(&mut self, status: &StatusSnapshot, hostile: bool) -> RiderTactic;

    /// Whether the out-of-band response matched the called word in time.
    fn shot_response(&mut self, word: ShotWord) -> bool;

    /// Notified of every signal as it is emitted.
    fn observe(&mut self, _signal: &Signal) {}
}

/// Queue-backed provider for scripted runs and tests.
///
/// Each queue is consumed in order; an exhausted queue answers with the
/// fallback for that decision.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisions {
    pub actions: VecDeque<TurnAction>,
    pub fort_orders: VecDeque<FortOrder>,
    pub eating: VecDeque<EatingLevel>,
    pub tactics: VecDeque<RiderTactic>,
    pub shots: VecDeque<bool>,
    pub fallback_eating: EatingLevel,
    pub fallback_shot: bool,
    observed: Vec<Signal>,
}

impl ScriptedDecisions {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fallback_eating: EatingLevel::Moderately,
            fallback_shot: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_actions(mut self, actions: impl IntoIterator<Item = TurnAction>) -> Self {
        self.actions.extend(actions);
        self
    }

    #[must_use]
    pub fn with_eating(mut self, levels: impl IntoIterator<Item = EatingLevel>) -> Self {
        self.eating.extend(levels);
        self
    }

    #[must_use]
    pub fn with_tactics(mut self, tactics: impl IntoIterator<Item = RiderTactic>) -> Self {
        self.tactics.extend(tactics);
        self
    }

    #[must_use]
    pub fn with_shots(mut self, shots: impl IntoIterator<Item = bool>) -> Self {
        self.shots.extend(shots);
        self
    }

    #[must_use]
    pub fn with_fort_orders(mut self, orders: impl IntoIterator<Item = FortOrder>) -> Self {
        self.fort_orders.extend(orders);
        self
    }

    #[must_use]
    pub fn fallback_eating(mut self, level: EatingLevel) -> Self {
        self.fallback_eating = level;
        self
    }

    #[must_use]
    pub fn fallback_shot(mut self, hit: bool) -> Self {
        self.fallback_shot = hit;
        self
    }

    /// Signals observed so far.
    #[must_use]
    pub fn observed(&self) -> &[Signal] {
        &self.observed
    }
}

impl DecisionSource for ScriptedDecisions {
    fn turn_action(&mut self, _status: &StatusSnapshot, _menu: ActionMenu) -> TurnAction {
        self.actions.pop_front().unwrap_or(TurnAction::Continue)
    }

    fn fort_order(&mut self, _status: &StatusSnapshot) -> FortOrder {
        self.fort_orders.pop_front().unwrap_or_default()
    }

    fn eating_level(&mut self, _status: &StatusSnapshot) -> EatingLevel {
        self.eating.pop_front().unwrap_or(self.fallback_eating)
    }

    fn rider_tactic(&mut self, _status: &StatusSnapshot, _hostile: bool) -> RiderTactic {
        self.tactics.pop_front().unwrap_or(RiderTactic::Continue)
    }

    fn shot_response(&mut self, _word: ShotWord) -> bool {
        self.shots.pop_front().unwrap_or(self.fallback_shot)
    }

    fn observe(&mut self, signal: &Signal) {
        self.observed.push(*signal);
    }
}
