use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::domain::Tier;
use crate::rating::RatingTable;

const FIRST_RANKED_TIER: Tier = 3; // Iron 1
const LAST_RANKED_TIER: Tier = 24; // Radiant
const ANCHOR_TIER: Tier = 11; // Silver 3
const ANCHOR_RATING: f64 = 1000.0;
const TIER_SPACING: f64 = 50.0;

/// Hand-seeded starting table: evenly spaced ratings anchored on Silver 3
pub fn seed_table(min_gap: f64) -> Result<RatingTable> {
    RatingTable::from_pairs(
        (FIRST_RANKED_TIER..=LAST_RANKED_TIER).map(|tier| {
            let offset = tier as f64 - ANCHOR_TIER as f64;
            (tier, ANCHOR_RATING + offset * TIER_SPACING)
        }),
        min_gap,
    )
}

/// Reads a `{ "tier": rating }` JSON object and checks it against the minimum gap
pub fn load_table(path: &Path, min_gap: f64) -> Result<RatingTable> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read rating table {}", path.display()))?;
    let table: RatingTable = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse rating table {}", path.display()))?;

    RatingTable::new(table.iter().collect(), min_gap)
        .with_context(|| format!("Invalid rating table {}", path.display()))
}

/// Table from `path` when given, the seeded table otherwise
pub fn resolve_table(path: Option<&Path>, min_gap: f64) -> Result<RatingTable> {
    match path {
        Some(path) => load_table(path, min_gap),
        None => seed_table(min_gap),
    }
}

pub fn save_table(path: &Path, table: &RatingTable) -> Result<()> {
    let json = serde_json::to_string_pretty(table).context("Failed to serialize rating table")?;
    fs::write(path, json).with_context(|| format!("Failed to write rating table {}", path.display()))
}
