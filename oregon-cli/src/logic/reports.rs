use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

use oregon_game::TurnOutcome;

use super::sweep::{RunRecord, StrategyAggregate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

/// Everything a sweep report renders.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport<'a> {
    pub aggregates: &'a [StrategyAggregate],
    pub records: &'a [RunRecord],
    /// `None` when the determinism replay was skipped.
    pub verified: Option<bool>,
}

impl SweepReport<'_> {
    /// Render in the requested format.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or serialization fails.
    pub fn write(&self, format: ReportFormat, out: &mut dyn Write) -> Result<()> {
        match format {
            ReportFormat::Console => generate_console_report(out, self),
            ReportFormat::Json => generate_json_report(out, self),
            ReportFormat::Markdown => generate_markdown_report(out, self),
        }
    }
}

fn outcome_label(outcome: &TurnOutcome) -> String {
    match outcome {
        TurnOutcome::Continue => "in progress".to_string(),
        TurnOutcome::Died(cause) => format!("died ({cause})"),
        TurnOutcome::Won(arrival) => format!("arrived {}", arrival.date.format("%B %-d")),
    }
}

fn deaths_summary(aggregate: &StrategyAggregate) -> String {
    if aggregate.deaths.is_empty() {
        return "none".to_string();
    }
    aggregate
        .deaths
        .iter()
        .map(|(cause, count)| format!("{cause} x{count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Colored console summary.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn generate_console_report(out: &mut dyn Write, report: &SweepReport<'_>) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Sweep Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "========================".cyan())?;
    writeln!(out, "Total runs: {}", report.records.len())?;

    for aggregate in report.aggregates {
        let pct = aggregate.win_rate * 100.0;
        let rate = format!("{pct:.1}%");
        let rate = if pct >= 50.0 {
            rate.green()
        } else if pct > 0.0 {
            rate.yellow()
        } else {
            rate.red()
        };
        writeln!(out)?;
        writeln!(out, "{}", aggregate.strategy.label().bold())?;
        writeln!(
            out,
            "   Arrived: {}/{} ({rate})",
            aggregate.wins, aggregate.runs
        )?;
        writeln!(
            out,
            "   Turns: {:.1} ± {:.1}   Miles: {:.0} ± {:.0}",
            aggregate.mean_turns, aggregate.std_turns, aggregate.mean_miles, aggregate.std_miles
        )?;
        writeln!(out, "   Deaths: {}", deaths_summary(aggregate))?;
    }

    writeln!(out)?;
    match report.verified {
        Some(true) => writeln!(out, "{}", "✅ Every run replayed identically".green())?,
        Some(false) => writeln!(out, "{}", "❌ Replay mismatch".red())?,
        None => writeln!(out, "Determinism replay skipped.")?,
    }
    Ok(())
}

/// Pretty-printed JSON of the whole report.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn generate_json_report(out: &mut dyn Write, report: &SweepReport<'_>) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

/// Markdown tables suitable for pasting into an issue.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn generate_markdown_report(out: &mut dyn Write, report: &SweepReport<'_>) -> Result<()> {
    writeln!(out, "# Oregon Trail Sweep Results\n")?;
    if report.records.is_empty() {
        writeln!(out, "_No runs executed._")?;
        return Ok(());
    }

    writeln!(out, "## Strategies\n")?;
    writeln!(
        out,
        "| Strategy | Runs | Arrived | Win rate | Mean turns | Mean miles | Deaths |"
    )?;
    writeln!(
        out,
        "|----------|------|---------|----------|------------|------------|--------|"
    )?;
    for aggregate in report.aggregates {
        writeln!(
            out,
            "| {} | {} | {} | {:.1}% | {:.1} | {:.0} | {} |",
            aggregate.strategy.label(),
            aggregate.runs,
            aggregate.wins,
            aggregate.win_rate * 100.0,
            aggregate.mean_turns,
            aggregate.mean_miles,
            deaths_summary(aggregate)
        )?;
    }

    writeln!(out, "\n## Runs\n")?;
    writeln!(out, "| Strategy | Outfit | Seed | Outcome | Turns | Miles | Fingerprint |")?;
    writeln!(out, "|----------|--------|------|---------|-------|-------|-------------|")?;
    for record in report.records {
        writeln!(
            out,
            "| {} | {} | `{:#010x}` | {} | {} | {} | `{:016x}` |",
            record.strategy.label(),
            record.outfit,
            record.seed,
            outcome_label(&record.outcome),
            record.turns,
            record.miles,
            record.fingerprint
        )?;
    }

    if let Some(verified) = report.verified {
        let verdict = if verified { "passed" } else { "failed" };
        writeln!(out, "\nDeterminism replay {verdict}.")?;
    }
    Ok(())
}
