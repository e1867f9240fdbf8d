pub mod policy;
pub mod reports;
pub mod seeds;
pub mod sweep;

use anyhow::{Context, Result, bail};
use oregon_game::{OutfitCatalog, OutfitPreset};
use std::path::Path;

pub use policy::GameplayStrategy;
pub use reports::{ReportFormat, SweepReport};
pub use seeds::resolve_seed_inputs;
pub use sweep::{SweepPlan, aggregate, run_sweep, verify_determinism};

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Built-in catalog, or the one at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_catalog(path: Option<&Path>) -> Result<OutfitCatalog> {
    let Some(path) = path else {
        return Ok(OutfitCatalog::default_catalog().clone());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    OutfitCatalog::from_json(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

/// Look up outfit ids; `all` expands to the whole catalog.
///
/// # Errors
///
/// Returns an error naming the first unknown id.
pub fn select_outfits(catalog: &OutfitCatalog, ids: &[String]) -> Result<Vec<OutfitPreset>> {
    if ids.iter().any(|id| id.eq_ignore_ascii_case("all")) {
        return Ok(catalog.presets.clone());
    }
    let mut selected = Vec::with_capacity(ids.len());
    for id in ids {
        let Some(preset) = catalog.get(id) else {
            let known = catalog.ids().collect::<Vec<_>>().join(", ");
            bail!("unknown outfit `{id}` (known: {known})");
        };
        selected.push(preset.clone());
    }
    if selected.is_empty() {
        bail!("no outfits selected");
    }
    Ok(selected)
}
