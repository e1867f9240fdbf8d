//! Structured outcome signals emitted by the turn engine.
//!
//! The engine never produces text. Each narrative beat becomes a
//! [`SignalKind`] carrying numeric payloads plus a stable `ui_key` the
//! presentation layer can map to its own wording.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::ArrivalDate;
use crate::events::HazardEvent;
use crate::fort::Supply;
use crate::health::IllnessGrade;
use crate::hunt::HuntOutcome;
use crate::journey::TurnAction;
use crate::mountains::MountainPass;
use crate::riders::{FightResult, RiderTactic};
use crate::skill::ShotWord;
use crate::state::EatingLevel;
use crate::terminal::DeathCause;

/// Stable, deterministic identifier for a single signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignalId {
    /// Turn counter when the signal occurred (0 before the first turn).
    pub turn: u32,
    /// Per-turn sequence number (0-based).
    pub seq: u16,
}

impl SignalId {
    #[must_use]
    pub const fn new(turn: u32, seq: u16) -> Self {
        Self { turn, seq }
    }
}

/// Severity tier for a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// Mechanical description of what just happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SignalKind {
    TurnStarted { date: NaiveDate },
    DoctorBill { amount: i32 },
    DoctorUnaffordable,
    LowFood { food: i32 },
    ActionChosen { action: TurnAction },
    FortPurchase { supply: Supply, spent: i32, gained: i32 },
    FortPurchaseMissed { supply: Supply, amount: i32 },
    Hunted { outcome: HuntOutcome },
    RationCut { requested: EatingLevel },
    Ate { level: EatingLevel, consumed: i32 },
    Traveled { miles: i32 },
    RidersAhead { hostile: bool },
    RiderTacticChosen { tactic: RiderTactic },
    RidersHeldFire,
    RiderFight { result: FightResult },
    RidersDeparted { hostile: bool },
    ShotCalled { word: ShotWord },
    Hazard { event: HazardEvent },
    BanditsTookCash { cash_left: i32 },
    BanditsRepelled,
    BanditsWounded,
    AnimalsOverpowered,
    AnimalsFought { clean: bool },
    ColdWeather { warm: bool },
    Illness { grade: IllnessGrade },
    RuggedMountains,
    LostInMountains,
    MountainWagonDamage,
    SlowGoing { miles: i32 },
    PassCleared { pass: MountainPass },
    Blizzard,
    Died { cause: DeathCause },
    Arrived { arrival: ArrivalDate },
}

impl SignalKind {
    /// i18n-style key for presentation-layer rendering.
    #[must_use]
    pub const fn ui_key(&self) -> &'static str {
        match self {
            Self::TurnStarted { .. } => "log.turn.start",
            Self::DoctorBill { .. } => "log.doctor.bill",
            Self::DoctorUnaffordable => "log.doctor.unaffordable",
            Self::LowFood { .. } => "log.food.low",
            Self::ActionChosen { .. } => "log.turn.action",
            Self::FortPurchase { .. } => "log.fort.purchase",
            Self::FortPurchaseMissed { .. } => "log.fort.missed",
            Self::Hunted { outcome } => outcome.ui_key(),
            Self::RationCut { .. } => "log.food.ration-cut",
            Self::Ate { .. } => "log.food.ate",
            Self::Traveled { .. } => "log.traveled",
            Self::RidersAhead { .. } => "log.riders.ahead",
            Self::RiderTacticChosen { .. } => "log.riders.tactic",
            Self::RidersHeldFire => "log.riders.held-fire",
            Self::RiderFight { result } => result.ui_key(),
            Self::RidersDeparted { .. } => "log.riders.departed",
            Self::ShotCalled { .. } => "log.shot.called",
            Self::Hazard { event } => event.ui_key(),
            Self::BanditsTookCash { .. } => "log.bandits.took-cash",
            Self::BanditsRepelled => "log.bandits.repelled",
            Self::BanditsWounded => "log.bandits.wounded",
            Self::AnimalsOverpowered => "log.animals.overpowered",
            Self::AnimalsFought { .. } => "log.animals.fought",
            Self::ColdWeather { .. } => "log.weather.cold",
            Self::Illness { grade } => grade.ui_key(),
            Self::RuggedMountains => "log.mountains.rugged",
            Self::LostInMountains => "log.mountains.lost",
            Self::MountainWagonDamage => "log.mountains.wagon-damage",
            Self::SlowGoing { .. } => "log.mountains.slow",
            Self::PassCleared { pass } => pass.ui_key(),
            Self::Blizzard => "log.mountains.blizzard",
            Self::Died { .. } => "log.end.died",
            Self::Arrived { .. } => "log.end.arrived",
        }
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Died { .. } | Self::DoctorUnaffordable => Severity::Critical,
            Self::LowFood { .. }
            | Self::FortPurchaseMissed { .. }
            | Self::RationCut { .. }
            | Self::RidersAhead { hostile: true }
            | Self::RiderFight { .. }
            | Self::Hazard { .. }
            | Self::BanditsTookCash { .. }
            | Self::BanditsWounded
            | Self::AnimalsOverpowered
            | Self::ColdWeather { warm: false }
            | Self::Illness { .. }
            | Self::LostInMountains
            | Self::MountainWagonDamage
            | Self::Blizzard => Severity::Warning,
            _ => Severity::Info,
        }
    }
}

/// Signal recorded in the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub id: SignalId,
    pub kind: SignalKind,
    pub severity: Severity,
}

impl Signal {
    #[must_use]
    pub const fn new(id: SignalId, kind: SignalKind) -> Self {
        Self {
            id,
            kind,
            severity: kind.severity(),
        }
    }

    #[must_use]
    pub const fn ui_key(&self) -> &'static str {
        self.kind.ui_key()
    }
}

/// Append-only record of every signal emitted during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    entries: Vec<Signal>,
}

impl Journal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a signal for `turn`, assigning the next per-turn sequence number.
    pub fn push(&mut self, turn: u32, kind: SignalKind) -> Signal {
        let seq = match self.entries.last() {
            Some(last) if last.id.turn == turn => last.id.seq.saturating_add(1),
            _ => 0,
        };
        let signal = Signal::new(SignalId::new(turn, seq), kind);
        self.entries.push(signal);
        signal
    }

    #[must_use]
    pub fn entries(&self) -> &[Signal] {
        &self.entries
    }

    /// Signals emitted during `turn`.
    pub fn for_turn(&self, turn: u32) -> impl Iterator<Item = &Signal> + '_ {
        self.entries.iter().filter(move |signal| signal.id.turn == turn)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when any signal of the journal satisfies `pred`.
    pub fn any(&self, pred: impl Fn(&SignalKind) -> bool) -> bool {
        self.entries.iter().any(|signal| pred(&signal.kind))
    }
}
