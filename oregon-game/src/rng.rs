//! Deterministic linear-congruential generator and seed selection.
//!
//! Every probabilistic decision in a run routes through a single [`TrailRng`]
//! owned by the journey. A fixed seed reproduces the entire run bit-for-bit,
//! so callers must never share one generator between runs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Seed used by the fixed-seed compatibility mode.
pub const PINNED_SEED: u32 = 0x1234_5678;

const LCG_MULTIPLIER: u32 = 1_103_515_245;
const LCG_INCREMENT: u32 = 12_345;
const LCG_MASK: u32 = 0x7fff_ffff;

/// Seeded LCG producing bounded integers and unit-interval doubles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailRng {
    state: u32,
    #[serde(default)]
    draws: u64,
}

impl TrailRng {
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self {
            state: seed,
            draws: 0,
        }
    }

    /// Reset the accumulator to `value` and clear the draw counter.
    pub const fn seed(&mut self, value: u32) {
        self.state = value;
        self.draws = 0;
    }

    /// Current accumulator value.
    #[must_use]
    pub const fn state(&self) -> u32 {
        self.state
    }

    /// Number of draws performed since the last reseed.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }

    const fn step(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT)
            & LCG_MASK;
        self.draws = self.draws.saturating_add(1);
        self.state
    }

    /// Integer in `[min, max]` inclusive. A reversed range collapses to `min`.
    pub fn next_int(&mut self, min: i32, max: i32) -> i32 {
        let raw = self.step();
        let span = u32::try_from(i64::from(max) - i64::from(min) + 1)
            .unwrap_or(1)
            .max(1);
        // raw % span <= i32::MAX because raw is masked to 31 bits.
        min.wrapping_add(i32::try_from(raw % span).unwrap_or(0))
    }

    /// Double derived as `state / 0x7fffffff`.
    pub fn next_unit(&mut self) -> f64 {
        f64::from(self.step()) / f64::from(LCG_MASK)
    }
}

impl Default for TrailRng {
    fn default() -> Self {
        Self::new(PINNED_SEED)
    }
}

/// Where a run's seed comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedSource {
    /// Fixed-seed compatibility mode ([`PINNED_SEED`]).
    Pinned,
    /// Caller-provided seed.
    Fixed(u32),
    /// Fresh entropy per run.
    Entropy,
}

impl SeedSource {
    /// Produce the concrete seed for a new run.
    #[must_use]
    pub fn resolve(self) -> u32 {
        match self {
            Self::Pinned => PINNED_SEED,
            Self::Fixed(seed) => seed,
            Self::Entropy => rand::random::<u32>(),
        }
    }

    /// Build a generator from this source.
    #[must_use]
    pub fn into_rng(self) -> TrailRng {
        TrailRng::new(self.resolve())
    }
}

impl fmt::Display for SeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pinned => f.write_str("pinned"),
            Self::Fixed(seed) => write!(f, "{seed:#010x}"),
            Self::Entropy => f.write_str("entropy"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized seed token: {0}")]
pub struct SeedParseError(pub String);

impl FromStr for SeedSource {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.eq_ignore_ascii_case("pinned") || token.eq_ignore_ascii_case("univac") {
            return Ok(Self::Pinned);
        }
        if token.eq_ignore_ascii_case("entropy") || token.eq_ignore_ascii_case("random") {
            return Ok(Self::Entropy);
        }
        let parsed = match token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
        {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => token.parse::<u32>().ok(),
        };
        parsed
            .map(Self::Fixed)
            .ok_or_else(|| SeedParseError(token.to_string()))
    }
}
