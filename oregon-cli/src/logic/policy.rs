use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use oregon_game::{
    ActionMenu, DecisionSource, EatingLevel, FortOrder, RiderTactic, ShotWord, StatusSnapshot,
    TurnAction,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Food worth keeping in the wagon before a cautious party stops buying.
const CAUTIOUS_FOOD_RESERVE: i32 = 120;
/// Below this a hunter heads out whenever the ammunition allows.
const HUNTER_FOOD_TARGET: i32 = 150;
const HUNT_AMMO_FLOOR: i32 = 40;
/// Chance the gambler types the called word correctly.
const GAMBLER_REFLEX: f64 = 0.7;

/// Built-in gameplay strategies for automated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameplayStrategy {
    /// Buys at every fort, eats well, circles the wagons.
    Cautious,
    /// Never stops, eats moderately, keeps moving.
    Steady,
    /// Lives off the land and shoots back.
    Hunter,
    /// Picks every answer at random.
    Gambler,
}

impl GameplayStrategy {
    pub const ALL: [Self; 4] = [Self::Cautious, Self::Steady, Self::Hunter, Self::Gambler];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cautious => "Cautious",
            Self::Steady => "Steady",
            Self::Hunter => "Hunter",
            Self::Gambler => "Gambler",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn DecisionSource> {
        match self {
            Self::Cautious => Box::new(CautiousPolicy),
            Self::Steady => Box::new(SteadyPolicy),
            Self::Hunter => Box::new(HunterPolicy),
            Self::Gambler => Box::new(GamblerPolicy::new(seed)),
        }
    }
}

impl fmt::Display for GameplayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Richest eating level the larder covers without dipping under `reserve`.
fn affordable_level(food: i32, reserve: i32) -> EatingLevel {
    EatingLevel::ALL
        .iter()
        .rev()
        .copied()
        .find(|level| food - level.ration() >= reserve)
        .unwrap_or(EatingLevel::Poorly)
}

struct CautiousPolicy;
struct SteadyPolicy;
struct HunterPolicy;

struct GamblerPolicy {
    rng: ChaCha20Rng,
}

impl GamblerPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl DecisionSource for CautiousPolicy {
    fn turn_action(&mut self, status: &StatusSnapshot, menu: ActionMenu) -> TurnAction {
        if menu == ActionMenu::WithFort && status.cash > 0 {
            TurnAction::StopAtFort
        } else if status.food < CAUTIOUS_FOOD_RESERVE / 2 && status.bullets >= HUNT_AMMO_FLOOR {
            TurnAction::Hunt
        } else {
            TurnAction::Continue
        }
    }

    fn fort_order(&mut self, status: &StatusSnapshot) -> FortOrder {
        let budget = status.cash;
        let food = if status.food < CAUTIOUS_FOOD_RESERVE {
            budget / 2
        } else {
            budget / 5
        };
        let misc = (budget - food) / 3;
        let ammunition = (budget - food - misc) / 2;
        FortOrder {
            food,
            ammunition,
            clothing: 0,
            misc_supplies: misc,
        }
    }

    fn eating_level(&mut self, status: &StatusSnapshot) -> EatingLevel {
        affordable_level(status.food, 0)
    }

    fn rider_tactic(&mut self, _status: &StatusSnapshot, hostile: bool) -> RiderTactic {
        if hostile {
            RiderTactic::CircleWagons
        } else {
            RiderTactic::Continue
        }
    }

    fn shot_response(&mut self, _word: ShotWord) -> bool {
        true
    }
}

impl DecisionSource for SteadyPolicy {
    fn turn_action(&mut self, _status: &StatusSnapshot, _menu: ActionMenu) -> TurnAction {
        TurnAction::Continue
    }

    fn fort_order(&mut self, _status: &StatusSnapshot) -> FortOrder {
        FortOrder::default()
    }

    fn eating_level(&mut self, _status: &StatusSnapshot) -> EatingLevel {
        EatingLevel::Moderately
    }

    fn rider_tactic(&mut self, _status: &StatusSnapshot, hostile: bool) -> RiderTactic {
        if hostile {
            RiderTactic::Run
        } else {
            RiderTactic::Continue
        }
    }

    fn shot_response(&mut self, _word: ShotWord) -> bool {
        true
    }
}

impl DecisionSource for HunterPolicy {
    fn turn_action(&mut self, status: &StatusSnapshot, _menu: ActionMenu) -> TurnAction {
        if status.food < HUNTER_FOOD_TARGET && status.bullets >= HUNT_AMMO_FLOOR {
            TurnAction::Hunt
        } else {
            TurnAction::Continue
        }
    }

    fn fort_order(&mut self, status: &StatusSnapshot) -> FortOrder {
        FortOrder {
            ammunition: status.cash,
            ..FortOrder::default()
        }
    }

    fn eating_level(&mut self, status: &StatusSnapshot) -> EatingLevel {
        affordable_level(status.food, 13)
    }

    fn rider_tactic(&mut self, _status: &StatusSnapshot, hostile: bool) -> RiderTactic {
        if hostile {
            RiderTactic::Attack
        } else {
            RiderTactic::Continue
        }
    }

    fn shot_response(&mut self, _word: ShotWord) -> bool {
        true
    }
}

impl DecisionSource for GamblerPolicy {
    fn turn_action(&mut self, _status: &StatusSnapshot, menu: ActionMenu) -> TurnAction {
        let options = menu.options();
        let idx = self.rng.gen_range(0..options.len());
        options[idx]
    }

    fn fort_order(&mut self, status: &StatusSnapshot) -> FortOrder {
        let cash = status.cash.max(0);
        let spend = self.rng.gen_range(0..=cash);
        FortOrder {
            food: spend / 2,
            ammunition: spend / 4,
            clothing: spend / 8,
            misc_supplies: spend / 8,
        }
    }

    fn eating_level(&mut self, _status: &StatusSnapshot) -> EatingLevel {
        let idx = self.rng.gen_range(0..EatingLevel::ALL.len());
        EatingLevel::ALL[idx]
    }

    fn rider_tactic(&mut self, _status: &StatusSnapshot, _hostile: bool) -> RiderTactic {
        let idx = self.rng.gen_range(0..RiderTactic::ALL.len());
        RiderTactic::ALL[idx]
    }

    fn shot_response(&mut self, _word: ShotWord) -> bool {
        self.rng.gen_bool(GAMBLER_REFLEX)
    }
}
