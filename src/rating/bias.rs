use std::collections::{BTreeMap, HashSet};

use super::duel::{DuelContext, rating_gain};
use super::main_weapon::MainWeaponIndex;
use super::types::RatingTable;
use crate::domain::{MatchRecord, PlayerEntry, PlayerId, Tier};
use crate::reference::WeaponCatalog;

/// Matches with fewer comparable players than this carry no signal
const MIN_COMPARABLE_PLAYERS: usize = 2;

/// Per-tier bias under one rating table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BiasReport {
    pub per_tier: BTreeMap<Tier, f64>,
    /// Sum of absolute per-tier biases
    pub total: f64,
}

impl BiasReport {
    pub fn bias(&self, tier: Tier) -> f64 {
        self.per_tier.get(&tier).copied().unwrap_or(0.0)
    }
}

/// Scores rating tables against a fixed deathmatch-type corpus.
///
/// Main weapons do not depend on the table, so they are classified once up front.
pub struct BiasScorer<'a> {
    matches: Vec<&'a MatchRecord>,
    index: MainWeaponIndex,
    excluded: HashSet<PlayerId>,
    reference_weapon: String,
    k_factor: f64,
}

impl<'a> BiasScorer<'a> {
    pub fn new<I>(
        matches: I,
        weapons: &WeaponCatalog,
        excluded: HashSet<PlayerId>,
        reference_weapon: &str,
        k_factor: f64,
    ) -> Self
    where
        I: IntoIterator<Item = &'a MatchRecord>,
    {
        let matches: Vec<&MatchRecord> = matches
            .into_iter()
            .filter(|m| m.queue.is_deathmatch_type())
            .collect();
        let index = MainWeaponIndex::build(matches.iter().copied(), weapons);

        Self {
            matches,
            index,
            excluded,
            reference_weapon: reference_weapon.to_string(),
            k_factor,
        }
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn reference_weapon(&self) -> &str {
        &self.reference_weapon
    }

    /// Mean rating gain of the tier's players using `weapon` as main weapon.
    ///
    /// Each player starts at the table's rating for the tier. Zero when the tier
    /// is outside the table or no match has enough comparable players.
    pub fn tier_bias(&self, table: &RatingTable, tier: Tier, weapon: &str) -> f64 {
        let Some(tier_rating) = table.rating(tier) else {
            return 0.0;
        };
        let context = DuelContext::new(table, &self.excluded, self.k_factor);

        let mut total_gain = 0.0;
        let mut players = 0usize;

        for record in &self.matches {
            let Some(classified) = self.index.get(&record.id) else {
                continue;
            };

            let comparable: Vec<&PlayerEntry> = record
                .players
                .iter()
                .filter(|p| p.tier == Some(tier))
                .filter(|p| !self.excluded.contains(&p.player_id))
                .filter(|p| classified.main_weapon(&p.player_id) == weapon)
                .collect();

            if comparable.len() < MIN_COMPARABLE_PLAYERS {
                continue;
            }

            for player in comparable {
                total_gain += rating_gain(record, classified, &player.player_id, tier_rating, &context);
                players += 1;
            }
        }

        if players == 0 { 0.0 } else { total_gain / players as f64 }
    }

    /// Bias of every tier in the table with the reference weapon
    pub fn score(&self, table: &RatingTable) -> BiasReport {
        let per_tier: BTreeMap<Tier, f64> = table
            .tiers()
            .map(|tier| (tier, self.tier_bias(table, tier, &self.reference_weapon)))
            .collect();
        let total = per_tier.values().map(|b| b.abs()).sum();

        BiasReport { per_tier, total }
    }
}
