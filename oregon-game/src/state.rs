use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::calendar;
use crate::constants::{
    FALLBACK_RATION, LOW_FOOD_THRESHOLD, MOUNTAIN_START, RATION_BASE, RATION_PER_LEVEL,
};

/// Health and milestone markers carried between turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    Illness,
    Injury,
    SouthPassCleared,
    BlueMountainsCleared,
    BlizzardHit,
}

impl Flag {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Illness => "illness",
            Self::Injury => "injury",
            Self::SouthPassCleared => "south_pass_cleared",
            Self::BlueMountainsCleared => "blue_mountains_cleared",
            Self::BlizzardHit => "blizzard_hit",
        }
    }

    /// Flags that send the party to the doctor at the start of the next turn.
    #[must_use]
    pub const fn needs_doctor(self) -> bool {
        matches!(self, Self::Illness | Self::Injury)
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of [`Flag`] values with independent insert/remove.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagSet(SmallVec<[Flag; 5]>);

impl FlagSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, flag: Flag) -> bool {
        self.0.contains(&flag)
    }

    /// Adds the flag, returning `false` when it was already present.
    pub fn insert(&mut self, flag: Flag) -> bool {
        if self.contains(flag) {
            return false;
        }
        self.0.push(flag);
        true
    }

    /// Removes the flag, returning `true` when it was present.
    pub fn remove(&mut self, flag: Flag) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| *existing != flag);
        before != self.0.len()
    }

    #[must_use]
    pub fn needs_doctor(&self) -> bool {
        self.0.iter().any(|flag| flag.needs_doctor())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Flag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        let mut set = Self::new();
        for flag in iter {
            set.insert(flag);
        }
        set
    }
}

/// Whether the next fort can be reached this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FortAvailability {
    #[default]
    Undecided,
    Available,
    Unavailable,
}

impl FortAvailability {
    /// Flip for the next turn. `Undecided` never flips.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Undecided => Self::Undecided,
            Self::Available => Self::Unavailable,
            Self::Unavailable => Self::Available,
        }
    }

    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// How well the party eats this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EatingLevel {
    #[default]
    Poorly,
    Moderately,
    Well,
}

impl EatingLevel {
    pub const ALL: [Self; 3] = [Self::Poorly, Self::Moderately, Self::Well];

    /// Map a 1-based menu answer. Out-of-range answers fall back to the last option.
    #[must_use]
    pub const fn from_choice(choice: i32) -> Self {
        match choice {
            1 => Self::Poorly,
            2 => Self::Moderately,
            _ => Self::Well,
        }
    }

    #[must_use]
    pub const fn level(self) -> i32 {
        match self {
            Self::Poorly => 1,
            Self::Moderately => 2,
            Self::Well => 3,
        }
    }

    /// Food consumed when eating at this level.
    #[must_use]
    pub const fn ration(self) -> i32 {
        RATION_BASE + RATION_PER_LEVEL * self.level()
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Poorly => "poorly",
            Self::Moderately => "moderately",
            Self::Well => "well",
        }
    }
}

impl FromStr for EatingLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "poorly" => Ok(Self::Poorly),
            "moderately" => Ok(Self::Moderately),
            "well" => Ok(Self::Well),
            _ => Err(()),
        }
    }
}

/// Self-assessed marksmanship, 1 being the best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShootingSkill {
    AceMarksman,
    GoodShot,
    #[default]
    FairToMiddlin,
    NeedMorePractice,
    ShakyKnees,
}

impl ShootingSkill {
    pub const ALL: [Self; 5] = [
        Self::AceMarksman,
        Self::GoodShot,
        Self::FairToMiddlin,
        Self::NeedMorePractice,
        Self::ShakyKnees,
    ];

    /// Map a 1-based menu answer. Out-of-range answers fall back to the last option.
    #[must_use]
    pub const fn from_choice(choice: i32) -> Self {
        match choice {
            1 => Self::AceMarksman,
            2 => Self::GoodShot,
            3 => Self::FairToMiddlin,
            4 => Self::NeedMorePractice,
            _ => Self::ShakyKnees,
        }
    }

    #[must_use]
    pub const fn level(self) -> i32 {
        match self {
            Self::AceMarksman => 1,
            Self::GoodShot => 2,
            Self::FairToMiddlin => 3,
            Self::NeedMorePractice => 4,
            Self::ShakyKnees => 5,
        }
    }
}

/// The single mutable aggregate for a run.
///
/// Supplies may dip below zero mid-turn so the death checks can see the
/// deficit; [`GameState::clamp_nonnegative`] restores the invariant at the
/// start of every turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub food: i32,
    pub bullets: i32,
    pub clothing: i32,
    pub misc_supplies: i32,
    pub cash: i32,
    /// Dollars spent on the team; degraded by hazards, drives travel speed.
    pub oxen: i32,
    pub miles_traveled: i32,
    pub miles_previous_turn: i32,
    pub turn_number: u32,
    pub shooting_skill: ShootingSkill,
    pub eating_level: EatingLevel,
    #[serde(default)]
    pub flags: FlagSet,
    #[serde(default)]
    pub fort: FortAvailability,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            food: 0,
            bullets: 0,
            clothing: 0,
            misc_supplies: 0,
            cash: 0,
            oxen: 0,
            miles_traveled: 0,
            miles_previous_turn: 0,
            turn_number: 0,
            shooting_skill: ShootingSkill::default(),
            eating_level: EatingLevel::default(),
            flags: FlagSet::new(),
            fort: FortAvailability::Available,
        }
    }
}

impl GameState {
    /// Zero out any supply (or cash) that went negative.
    pub fn clamp_nonnegative(&mut self) {
        for field in [
            &mut self.food,
            &mut self.bullets,
            &mut self.clothing,
            &mut self.misc_supplies,
            &mut self.cash,
        ] {
            if *field < 0 {
                *field = 0;
            }
        }
    }

    /// Deduct `amount` from cash. On insufficient funds cash is clamped to
    /// zero and `false` is returned.
    pub fn charge(&mut self, amount: i32) -> bool {
        self.cash -= amount;
        if self.cash < 0 {
            self.cash = 0;
            return false;
        }
        true
    }

    /// Move forward along the trail.
    pub const fn advance(&mut self, miles: i32) {
        self.miles_traveled += miles;
    }

    /// Lose ground to a setback, never dropping below the trailhead.
    pub fn retreat(&mut self, miles: i32) {
        self.miles_traveled = (self.miles_traveled - miles).max(0);
    }

    /// Food needed to eat at `level`, with the poor-eating fallback applied
    /// when the larder cannot cover it.
    #[must_use]
    pub const fn ration_for(&self, level: EatingLevel) -> (EatingLevel, i32) {
        let wanted = level.ration();
        if self.food < wanted {
            (EatingLevel::Poorly, FALLBACK_RATION)
        } else {
            (level, wanted)
        }
    }

    #[must_use]
    pub const fn in_mountains(&self) -> bool {
        self.miles_traveled > MOUNTAIN_START
    }

    #[must_use]
    pub fn has_flag(&self, flag: Flag) -> bool {
        self.flags.contains(flag)
    }

    /// Read-only view for the presentation layer.
    #[must_use]
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            turn: self.turn_number,
            date: calendar::turn_date(self.turn_number),
            food: self.food.max(0),
            bullets: self.bullets.max(0),
            clothing: self.clothing.max(0),
            misc_supplies: self.misc_supplies.max(0),
            cash: self.cash.max(0),
            miles_traveled: self.miles_traveled,
            displayed_mileage: self.miles_traveled.min(MOUNTAIN_START),
            fort_available: self.fort.is_available(),
            low_food: self.food < LOW_FOOD_THRESHOLD,
        }
    }
}

/// Status line shown to the player at the top of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub turn: u32,
    pub date: NaiveDate,
    pub food: i32,
    pub bullets: i32,
    pub clothing: i32,
    pub misc_supplies: i32,
    pub cash: i32,
    pub miles_traveled: i32,
    /// Mileage as shown to the player; hidden past the mountain line.
    pub displayed_mileage: i32,
    pub fort_available: bool,
    pub low_food: bool,
}
