//! Outfitting: turning the opening purchases into the starting ledger.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

use crate::constants::{AVAILABLE_MONEY, BULLETS_PER_DOLLAR, OXEN_MAX_SPEND, OXEN_MIN_SPEND};
use crate::state::{EatingLevel, FlagSet, FortAvailability, GameState, ShootingSkill};

const DEFAULT_OUTFIT_DATA: &str = include_str!("../assets/outfits.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OutfitError {
    #[error("overspent: ${spent} of ${budget} available")]
    Overspent { spent: i32, budget: i32 },
}

/// Dollars spent on each line before departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialPurchases {
    #[serde(default)]
    pub shooting_skill: ShootingSkill,
    pub oxen: i32,
    #[serde(default)]
    pub food: i32,
    #[serde(default)]
    pub ammunition: i32,
    #[serde(default)]
    pub clothing: i32,
    #[serde(default)]
    pub misc_supplies: i32,
}

impl Default for InitialPurchases {
    fn default() -> Self {
        Self {
            shooting_skill: ShootingSkill::default(),
            oxen: OXEN_MIN_SPEND,
            food: 0,
            ammunition: 0,
            clothing: 0,
            misc_supplies: 0,
        }
    }
}

impl InitialPurchases {
    /// Negative lines become zero and the oxen spend is held to its legal range.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            shooting_skill: self.shooting_skill,
            oxen: self.oxen.clamp(OXEN_MIN_SPEND, OXEN_MAX_SPEND),
            food: self.food.max(0),
            ammunition: self.ammunition.max(0),
            clothing: self.clothing.max(0),
            misc_supplies: self.misc_supplies.max(0),
        }
    }

    #[must_use]
    pub const fn total(&self) -> i32 {
        self.oxen + self.food + self.ammunition + self.clothing + self.misc_supplies
    }

    /// Build the starting ledger.
    ///
    /// # Errors
    ///
    /// Returns [`OutfitError::Overspent`] when the purchases exceed the budget.
    pub fn outfit(&self) -> Result<GameState, OutfitError> {
        let purchases = self.normalized();
        let spent = purchases.total();
        if spent > AVAILABLE_MONEY {
            return Err(OutfitError::Overspent {
                spent,
                budget: AVAILABLE_MONEY,
            });
        }
        log::debug!("outfitted for ${spent}, ${} left", AVAILABLE_MONEY - spent);
        Ok(GameState {
            food: purchases.food,
            bullets: purchases.ammunition * BULLETS_PER_DOLLAR,
            clothing: purchases.clothing,
            misc_supplies: purchases.misc_supplies,
            cash: AVAILABLE_MONEY - spent,
            oxen: purchases.oxen,
            miles_traveled: 0,
            miles_previous_turn: 0,
            turn_number: 0,
            shooting_skill: purchases.shooting_skill,
            eating_level: EatingLevel::Poorly,
            flags: FlagSet::new(),
            fort: FortAvailability::Available,
        })
    }
}

/// Create a fresh run state from the opening purchases.
///
/// # Errors
///
/// Returns [`OutfitError::Overspent`] when the purchases exceed the budget.
pub fn new_game(purchases: &InitialPurchases) -> Result<GameState, OutfitError> {
    purchases.outfit()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitPreset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    pub purchases: InitialPurchases,
}

/// Named opening loadouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutfitCatalog {
    #[serde(default)]
    pub presets: Vec<OutfitPreset>,
}

impl OutfitCatalog {
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_OUTFIT_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn default_catalog() -> &'static Self {
        static CATALOG: OnceLock<OutfitCatalog> = OnceLock::new();
        CATALOG.get_or_init(Self::load_from_static)
    }

    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into an outfit catalog.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&OutfitPreset> {
        self.presets.iter().find(|preset| preset.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.presets.iter().map(|preset| preset.id.as_str())
    }
}
