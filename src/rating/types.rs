use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::Tier;

pub type RatingValue = f64;

/// Slack for float noise when comparing tier gaps against the minimum gap
const GAP_TOLERANCE: f64 = 1e-9;

/// Tier → rating lookup; adjacent tiers keep at least the configured minimum gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingTable {
    ratings: BTreeMap<Tier, RatingValue>,
}

impl RatingTable {
    pub fn new(ratings: BTreeMap<Tier, RatingValue>, min_gap: f64) -> Result<Self> {
        if let Some((tier, rating)) = ratings.iter().find(|(_, r)| !r.is_finite()) {
            bail!("Rating for tier {} is not a finite number: {}", tier, rating);
        }

        let table = Self { ratings };
        if let Some((lower, upper)) = table.first_gap_violation(min_gap) {
            bail!(
                "Ratings for tiers {} and {} are closer than the minimum gap of {}",
                lower,
                upper,
                min_gap
            );
        }

        Ok(table)
    }

    pub fn from_pairs<I: IntoIterator<Item = (Tier, RatingValue)>>(pairs: I, min_gap: f64) -> Result<Self> {
        Self::new(pairs.into_iter().collect(), min_gap)
    }

    pub fn rating(&self, tier: Tier) -> Option<RatingValue> {
        self.ratings.get(&tier).copied()
    }

    pub fn tiers(&self) -> impl Iterator<Item = Tier> + '_ {
        self.ratings.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tier, RatingValue)> + '_ {
        self.ratings.iter().map(|(t, r)| (*t, *r))
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    pub fn satisfies_min_gap(&self, min_gap: f64) -> bool {
        self.first_gap_violation(min_gap).is_none()
    }

    /// Moves one tier by `amount`, pushing neighbours along until every gap holds again.
    ///
    /// Increases cascade upward, decreases cascade downward. Tiers outside the
    /// domain are ignored.
    pub fn nudge(&mut self, tier: Tier, amount: RatingValue, min_gap: f64) {
        let Some(rating) = self.ratings.get_mut(&tier) else {
            return;
        };
        *rating += amount;

        let neighbour = if amount > 0.0 {
            self.next_tier(tier).filter(|&upper| self.gap(tier, upper) < min_gap - GAP_TOLERANCE)
        } else if amount < 0.0 {
            self.previous_tier(tier).filter(|&lower| self.gap(lower, tier) < min_gap - GAP_TOLERANCE)
        } else {
            None
        };

        if let Some(neighbour) = neighbour {
            self.nudge(neighbour, amount, min_gap);
        }
    }

    /// Copy of the table with one tier nudged
    pub fn nudged(&self, tier: Tier, amount: RatingValue, min_gap: f64) -> Self {
        let mut candidate = self.clone();
        candidate.nudge(tier, amount, min_gap);
        candidate
    }

    fn next_tier(&self, tier: Tier) -> Option<Tier> {
        self.ratings.range(tier + 1..).next().map(|(t, _)| *t)
    }

    fn previous_tier(&self, tier: Tier) -> Option<Tier> {
        self.ratings.range(..tier).next_back().map(|(t, _)| *t)
    }

    fn gap(&self, lower: Tier, upper: Tier) -> f64 {
        self.ratings[&upper] - self.ratings[&lower]
    }

    fn first_gap_violation(&self, min_gap: f64) -> Option<(Tier, Tier)> {
        self.ratings
            .iter()
            .zip(self.ratings.iter().skip(1))
            .find(|((_, lower), (_, upper))| *upper - *lower < min_gap - GAP_TOLERANCE)
            .map(|((lower, _), (upper, _))| (*lower, *upper))
    }
}

/// Expected and actual duel outcomes accumulated for one player
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DuelTally {
    pub expected: f64,
    pub actual: f64,
    pub duels: usize,
}

impl DuelTally {
    pub fn record_win(&mut self, expected: f64) {
        self.expected += expected;
        self.actual += 1.0;
        self.duels += 1;
    }

    pub fn record_loss(&mut self, expected: f64) {
        self.expected += expected;
        self.duels += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.duels == 0
    }

    /// Rating change implied by the tally: `k * (actual - expected)`
    pub fn rating_delta(&self, rating: RatingValue, k_factor: f64) -> RatingValue {
        if self.is_empty() {
            return 0.0;
        }
        let new_rating = rating + k_factor * (self.actual - self.expected);
        new_rating - rating
    }
}
