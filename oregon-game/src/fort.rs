//! Fort stop: the in-trail store at marked-up prices.

use serde::{Deserialize, Serialize};

use crate::constants::{BULLETS_PER_DOLLAR, FORT_PRICE_DENOMINATOR, FORT_PRICE_NUMERATOR};
use crate::journey::{SignalKind, TurnContext};
use crate::state::GameState;

/// Purchasable supply line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Supply {
    Food,
    Ammunition,
    Clothing,
    MiscSupplies,
}

impl Supply {
    /// Purchase order at a fort.
    pub const ALL: [Self; 4] = [
        Self::Food,
        Self::Ammunition,
        Self::Clothing,
        Self::MiscSupplies,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Ammunition => "ammunition",
            Self::Clothing => "clothing",
            Self::MiscSupplies => "miscellaneous supplies",
        }
    }

    /// Units received for `dollars` spent at fort prices.
    #[must_use]
    pub const fn fort_yield(self, dollars: i32) -> i32 {
        let value = dollars * FORT_PRICE_NUMERATOR / FORT_PRICE_DENOMINATOR;
        match self {
            Self::Ammunition => value * BULLETS_PER_DOLLAR,
            Self::Food | Self::Clothing | Self::MiscSupplies => value,
        }
    }

    fn stock_mut(self, state: &mut GameState) -> &mut i32 {
        match self {
            Self::Food => &mut state.food,
            Self::Ammunition => &mut state.bullets,
            Self::Clothing => &mut state.clothing,
            Self::MiscSupplies => &mut state.misc_supplies,
        }
    }
}

/// Dollar amounts the player wants to spend at a fort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortOrder {
    pub food: i32,
    pub ammunition: i32,
    pub clothing: i32,
    pub misc_supplies: i32,
}

impl FortOrder {
    #[must_use]
    pub const fn amount(&self, supply: Supply) -> i32 {
        match supply {
            Supply::Food => self.food,
            Supply::Ammunition => self.ammunition,
            Supply::Clothing => self.clothing,
            Supply::MiscSupplies => self.misc_supplies,
        }
    }

    #[must_use]
    pub const fn total(&self) -> i32 {
        self.food + self.ammunition + self.clothing + self.misc_supplies
    }
}

/// Result of one line of a fort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purchase {
    Bought { spent: i32, gained: i32 },
    Missed { amount: i32 },
    Skipped,
}

/// Buy a single supply line, charging cash. Negative requests buy nothing;
/// requests above the remaining cash forfeit the line.
pub fn buy(state: &mut GameState, supply: Supply, amount: i32) -> Purchase {
    if amount <= 0 {
        return Purchase::Skipped;
    }
    if amount > state.cash {
        return Purchase::Missed { amount };
    }
    let gained = supply.fort_yield(amount);
    *supply.stock_mut(state) += gained;
    state.cash -= amount;
    Purchase::Bought {
        spent: amount,
        gained,
    }
}

/// Ask for an order and fill it line by line.
pub fn visit_fort(ctx: &mut TurnContext<'_>) {
    let status = ctx.state.snapshot();
    let order = ctx.decisions.fort_order(&status);
    for supply in Supply::ALL {
        match buy(ctx.state, supply, order.amount(supply)) {
            Purchase::Bought { spent, gained } => {
                ctx.emit(SignalKind::FortPurchase {
                    supply,
                    spent,
                    gained,
                });
            }
            Purchase::Missed { amount } => {
                ctx.emit(SignalKind::FortPurchaseMissed { supply, amount });
            }
            Purchase::Skipped => {}
        }
    }
    log::debug!("fort visit leaves ${} in cash", ctx.state.cash);
}
