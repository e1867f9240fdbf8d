use anyhow::{Context, Result};
use oregon_game::SeedSource;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Concrete seed for one sweep column plus the token it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedInfo {
    pub seed: u32,
    pub token: String,
}

impl SeedInfo {
    #[must_use]
    pub fn from_numeric(seed: u32) -> Self {
        Self {
            seed,
            token: format!("{seed:#010x}"),
        }
    }

    /// Seed used by iteration `n` of this column.
    #[must_use]
    pub const fn iteration(&self, n: u32) -> u32 {
        self.seed.wrapping_add(n)
    }
}

/// Resolve CLI seed tokens into concrete seeds.
///
/// Accepts decimal, `0x` hex, `pinned` and `entropy`. Entropy is resolved
/// here so every later replay sees the same value. Duplicates are dropped
/// and an empty list falls back to the pinned seed.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<SeedInfo>> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }
        let source: SeedSource = token
            .parse()
            .with_context(|| format!("invalid seed `{token}`"))?;
        let seed = source.resolve();
        if seen.insert(seed) {
            resolved.push(SeedInfo {
                token: token.clone(),
                ..SeedInfo::from_numeric(seed)
            });
        }
    }

    if resolved.is_empty() {
        resolved.push(SeedInfo {
            seed: SeedSource::Pinned.resolve(),
            token: "pinned".to_string(),
        });
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oregon_game::PINNED_SEED;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn parses_decimal_hex_and_pinned() {
        let seeds = resolve_seed_inputs(&tokens(&["42", "0x10", "pinned"])).unwrap();
        let values: Vec<u32> = seeds.iter().map(|info| info.seed).collect();
        assert_eq!(values, vec![42, 16, PINNED_SEED]);
        assert_eq!(seeds[1].token, "0x10");
    }

    #[test]
    fn duplicates_collapse_and_empty_defaults_to_pinned() {
        let seeds = resolve_seed_inputs(&tokens(&["305419896", "pinned", ""])).unwrap();
        assert_eq!(seeds.len(), 1);
        let fallback = resolve_seed_inputs(&[]).unwrap();
        assert_eq!(fallback, vec![SeedInfo {
            seed: PINNED_SEED,
            token: "pinned".to_string()
        }]);
    }

    #[test]
    fn rejects_garbage() {
        let err = resolve_seed_inputs(&tokens(&["oxcart"])).unwrap_err();
        assert!(err.to_string().contains("oxcart"));
    }

    #[test]
    fn iterations_wrap() {
        let info = SeedInfo::from_numeric(u32::MAX);
        assert_eq!(info.iteration(0), u32::MAX);
        assert_eq!(info.iteration(1), 0);
        assert_eq!(info.token, "0xffffffff");
    }
}
