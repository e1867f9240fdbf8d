//! Oregon Trail Game Engine
//!
//! Deterministic turn engine for the 1847 overland journey. The crate owns
//! the seeded generator, the supply ledger, every hazard resolver and the
//! terminal checks; presentation and input live behind
//! [`DecisionSource`] and the [`Signal`] journal.

pub mod calendar;
pub mod constants;
pub mod events;
pub mod fort;
pub mod health;
pub mod hunt;
pub mod journey;
pub mod mountains;
pub mod numbers;
pub mod outfit;
pub mod riders;
pub mod rng;
pub mod skill;
pub mod state;
pub mod terminal;
pub mod travel;

pub use calendar::ArrivalDate;
pub use events::HazardEvent;
pub use fort::{FortOrder, Supply};
pub use health::IllnessGrade;
pub use hunt::HuntOutcome;
pub use journey::{
    ActionMenu, DecisionSource, Journal, Journey, JourneyError, ScriptedDecisions, Severity,
    Signal, SignalId, SignalKind, TurnAction, TurnContext,
};
pub use mountains::MountainPass;
pub use outfit::{InitialPurchases, OutfitCatalog, OutfitError, OutfitPreset, new_game};
pub use riders::{FightResult, RiderTactic};
pub use rng::{PINNED_SEED, SeedParseError, SeedSource, TrailRng};
pub use skill::{ShotOutcome, ShotWord};
pub use state::{
    EatingLevel, Flag, FlagSet, FortAvailability, GameState, ShootingSkill, StatusSnapshot,
};
pub use terminal::{DeathCause, Survival, TurnOutcome};
