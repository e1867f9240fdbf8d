use anyhow::{Context, Result, bail};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::hash::Hasher;
use twox_hash::XxHash64;

use oregon_game::{DeathCause, Journey, OutfitPreset, SeedSource, TurnOutcome};

use super::policy::GameplayStrategy;
use super::seeds::SeedInfo;

/// Everything a sweep needs to enumerate its runs.
#[derive(Debug, Clone)]
pub struct SweepPlan {
    pub seeds: Vec<SeedInfo>,
    pub iterations: u32,
    pub strategies: Vec<GameplayStrategy>,
    pub outfits: Vec<OutfitPreset>,
}

impl SweepPlan {
    #[must_use]
    pub fn run_count(&self) -> usize {
        self.seeds.len()
            * usize::try_from(self.iterations).unwrap_or(usize::MAX)
            * self.strategies.len()
            * self.outfits.len()
    }
}

/// Result of a single automated journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    pub strategy: GameplayStrategy,
    pub outfit: String,
    pub seed: u32,
    pub outcome: TurnOutcome,
    pub turns: u32,
    pub miles: i32,
    pub signals: usize,
    pub draws: u64,
    pub fingerprint: u64,
}

impl RunRecord {
    #[must_use]
    pub const fn won(&self) -> bool {
        matches!(self.outcome, TurnOutcome::Won(_))
    }
}

/// Per-strategy roll-up across every seed and outfit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyAggregate {
    pub strategy: GameplayStrategy,
    pub runs: u32,
    pub wins: u32,
    pub win_rate: f64,
    pub mean_turns: f64,
    pub std_turns: f64,
    pub mean_miles: f64,
    pub std_miles: f64,
    pub deaths: BTreeMap<String, u32>,
}

/// Hash of the finished run: outcome, final ledger, journal and generator state.
///
/// # Errors
///
/// Returns an error if the run cannot be serialized.
pub fn fingerprint(journey: &Journey) -> Result<u64> {
    let encoded = serde_json::to_string(&(journey.outcome(), journey.state(), journey.journal()))
        .context("serializing run for fingerprint")?;
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(encoded.as_bytes());
    hasher.write_u32(journey.rng().state());
    Ok(hasher.finish())
}

/// Play one journey to the end with the given strategy.
///
/// # Errors
///
/// Returns an error if the outfit overspends or the run cannot be fingerprinted.
pub fn run_once(strategy: GameplayStrategy, preset: &OutfitPreset, seed: u32) -> Result<RunRecord> {
    let mut journey = Journey::outfit(&preset.purchases, SeedSource::Fixed(seed))
        .with_context(|| format!("outfit `{}` is not affordable", preset.id))?;
    let mut policy = strategy.create_policy(u64::from(seed));
    let outcome = journey.play_to_end(policy.as_mut());
    let state = journey.state();
    debug!(
        "{strategy} / {} / {seed:#010x}: {outcome:?} after {} turns",
        preset.id, state.turn_number
    );
    Ok(RunRecord {
        strategy,
        outfit: preset.id.clone(),
        seed,
        outcome,
        turns: state.turn_number,
        miles: state.miles_traveled,
        signals: journey.journal().len(),
        draws: journey.rng().draws(),
        fingerprint: fingerprint(&journey)?,
    })
}

/// Run every strategy over every seed, iteration and outfit.
///
/// # Errors
///
/// Propagates the first failing run.
pub fn run_sweep(plan: &SweepPlan) -> Result<Vec<RunRecord>> {
    info!(
        "sweeping {} runs ({} strategies, {} outfits, {} seeds x {} iterations)",
        plan.run_count(),
        plan.strategies.len(),
        plan.outfits.len(),
        plan.seeds.len(),
        plan.iterations
    );
    let mut records = Vec::with_capacity(plan.run_count());
    for &strategy in &plan.strategies {
        for preset in &plan.outfits {
            for info in &plan.seeds {
                for n in 0..plan.iterations {
                    records.push(run_once(strategy, preset, info.iteration(n))?);
                }
            }
        }
    }
    Ok(records)
}

/// Replay every run and compare fingerprints.
///
/// # Errors
///
/// Fails on the first run whose replay diverges.
pub fn verify_determinism(records: &[RunRecord], outfits: &[OutfitPreset]) -> Result<()> {
    for record in records {
        let Some(preset) = outfits.iter().find(|preset| preset.id == record.outfit) else {
            bail!("no outfit named `{}` to replay", record.outfit);
        };
        let replay = run_once(record.strategy, preset, record.seed)?;
        if replay.fingerprint != record.fingerprint {
            bail!(
                "{} / {} / {:#010x} diverged on replay: {:016x} != {:016x}",
                record.strategy,
                record.outfit,
                record.seed,
                record.fingerprint,
                replay.fingerprint
            );
        }
    }
    info!("{} runs replayed identically", records.len());
    Ok(())
}

/// Group records by strategy, in strategy order.
#[must_use]
pub fn aggregate(records: &[RunRecord]) -> Vec<StrategyAggregate> {
    let mut builders: BTreeMap<GameplayStrategy, AggregateBuilder> = BTreeMap::new();
    for record in records {
        builders
            .entry(record.strategy)
            .or_insert_with(|| AggregateBuilder::new(record.strategy))
            .ingest(record);
    }
    builders.into_values().map(AggregateBuilder::finish).collect()
}

struct AggregateBuilder {
    strategy: GameplayStrategy,
    runs: u32,
    wins: u32,
    stats_turns: RunningStats,
    stats_miles: RunningStats,
    deaths: BTreeMap<String, u32>,
}

impl AggregateBuilder {
    fn new(strategy: GameplayStrategy) -> Self {
        Self {
            strategy,
            runs: 0,
            wins: 0,
            stats_turns: RunningStats::default(),
            stats_miles: RunningStats::default(),
            deaths: BTreeMap::new(),
        }
    }

    fn ingest(&mut self, record: &RunRecord) {
        self.runs += 1;
        self.stats_turns.add(f64::from(record.turns));
        self.stats_miles.add(f64::from(record.miles));
        if record.won() {
            self.wins += 1;
        }
        if let Some(cause) = record.outcome.death_cause() {
            *self.deaths.entry(death_label(cause)).or_insert(0) += 1;
        }
    }

    fn finish(self) -> StrategyAggregate {
        let win_rate = if self.runs == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.runs)
        };
        StrategyAggregate {
            strategy: self.strategy,
            runs: self.runs,
            wins: self.wins,
            win_rate,
            mean_turns: self.stats_turns.mean(),
            std_turns: self.stats_turns.std_dev(),
            mean_miles: self.stats_miles.mean(),
            std_miles: self.stats_miles.std_dev(),
            deaths: self.deaths,
        }
    }
}

fn death_label(cause: DeathCause) -> String {
    cause.key().to_string()
}

/// Welford accumulator.
#[derive(Debug, Default, Clone, Copy)]
struct RunningStats {
    count: u32,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    fn add(&mut self, value: f64) {
        self.count += 1;
        let count = f64::from(self.count);
        let delta = value - self.mean;
        self.mean += delta / count;
        self.m2 += delta * (value - self.mean);
    }

    const fn mean(&self) -> f64 {
        if self.count == 0 { 0.0 } else { self.mean }
    }

    fn std_dev(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            (self.m2 / f64::from(self.count - 1)).sqrt()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oregon_game::{ArrivalDate, OutfitCatalog};

    fn balanced() -> OutfitPreset {
        OutfitCatalog::default_catalog()
            .get("balanced")
            .cloned()
            .expect("balanced preset ships")
    }

    fn record(strategy: GameplayStrategy, outcome: TurnOutcome, turns: u32, miles: i32) -> RunRecord {
        RunRecord {
            strategy,
            outfit: "balanced".to_string(),
            seed: 1,
            outcome,
            turns,
            miles,
            signals: 0,
            draws: 0,
            fingerprint: 0,
        }
    }

    #[test]
    fn running_stats_match_sample_deviation() {
        let mut stats = RunningStats::default();
        for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            stats.add(value);
        }
        assert!((stats.mean() - 5.0).abs() < 1e-9);
        assert!((stats.std_dev() - 2.138_089_935).abs() < 1e-6);
        assert!(RunningStats::default().std_dev().abs() < f64::EPSILON);
    }

    #[test]
    fn aggregate_counts_wins_and_deaths() {
        let arrival = ArrivalDate::interpolate(12, 1_900, 2_040);
        let records = vec![
            record(GameplayStrategy::Steady, TurnOutcome::Won(arrival), 12, 2_040),
            record(GameplayStrategy::Steady, TurnOutcome::Died(DeathCause::Disease), 4, 600),
            record(GameplayStrategy::Steady, TurnOutcome::Died(DeathCause::Disease), 6, 800),
            record(GameplayStrategy::Cautious, TurnOutcome::Died(DeathCause::Massacre), 3, 300),
        ];
        let aggregates = aggregate(&records);
        assert_eq!(aggregates.len(), 2);
        assert_eq!(aggregates[0].strategy, GameplayStrategy::Cautious);
        let steady = &aggregates[1];
        assert_eq!(steady.runs, 3);
        assert_eq!(steady.wins, 1);
        assert!((steady.win_rate - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(steady.deaths.get("disease"), Some(&2));
        assert!((steady.mean_turns - 22.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn runs_are_reproducible() {
        let preset = balanced();
        for strategy in GameplayStrategy::ALL {
            let first = run_once(strategy, &preset, 77).unwrap();
            let second = run_once(strategy, &preset, 77).unwrap();
            assert_eq!(first, second);
            assert!(first.outcome.is_terminal());
            assert!(first.turns <= 20);
        }
    }

    #[test]
    fn sweep_enumerates_and_verifies() {
        let plan = SweepPlan {
            seeds: vec![SeedInfo::from_numeric(5), SeedInfo::from_numeric(900)],
            iterations: 2,
            strategies: vec![GameplayStrategy::Steady, GameplayStrategy::Gambler],
            outfits: vec![balanced()],
        };
        let records = run_sweep(&plan).unwrap();
        assert_eq!(records.len(), plan.run_count());
        assert_eq!(records.len(), 8);
        assert_eq!(records[1].seed, 6);
        verify_determinism(&records, &plan.outfits).unwrap();
    }

    #[test]
    fn tampered_fingerprint_is_caught() {
        let preset = balanced();
        let mut record = run_once(GameplayStrategy::Hunter, &preset, 3).unwrap();
        record.fingerprint ^= 1;
        let err = verify_determinism(&[record], &[preset]).unwrap_err();
        assert!(err.to_string().contains("diverged"));
    }

    #[test]
    fn overspent_outfit_is_an_error() {
        let mut preset = balanced();
        preset.purchases.food = 600;
        assert!(run_once(GameplayStrategy::Steady, &preset, 1).is_err());
    }
}
