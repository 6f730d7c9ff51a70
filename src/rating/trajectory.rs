use std::collections::{BTreeMap, HashSet};

use log::debug;

use super::duel::{DuelContext, rating_gain};
use super::main_weapon::{MatchWeapons, UNKNOWN_WEAPON};
use super::types::{RatingTable, RatingValue};
use crate::config::settings::RatingSettings;
use crate::domain::{MatchCorpus, PlayerId};
use crate::reference::WeaponCatalog;

/// Running rating for one weapon class
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponTrajectory {
    pub weapon: String,
    /// Starts at the baseline; one more entry per scored match
    pub ratings: Vec<RatingValue>,
    pub match_ids: Vec<String>,
}

impl WeaponTrajectory {
    fn new(weapon: &str, baseline: RatingValue) -> Self {
        Self {
            weapon: weapon.to_string(),
            ratings: vec![baseline],
            match_ids: Vec::new(),
        }
    }

    pub fn current(&self) -> RatingValue {
        self.ratings.last().copied().unwrap_or_default()
    }

    pub fn matches_played(&self) -> usize {
        self.match_ids.len()
    }

    fn push(&mut self, match_id: &str, delta: RatingValue) {
        let next = self.current() + delta;
        self.ratings.push(next);
        self.match_ids.push(match_id.to_string());
    }
}

/// Rating sequences per weapon class for one player
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingTrajectory {
    by_weapon: BTreeMap<String, WeaponTrajectory>,
}

impl RatingTrajectory {
    pub fn weapon(&self, weapon: &str) -> Option<&WeaponTrajectory> {
        self.by_weapon.get(weapon)
    }

    pub fn weapons(&self) -> impl Iterator<Item = &WeaponTrajectory> {
        self.by_weapon.values()
    }

    pub fn is_empty(&self) -> bool {
        self.by_weapon.is_empty()
    }
}

/// Folds the duel rating gain over the player's deathmatch-type matches in
/// chronological order, one sequence per main weapon.
pub fn build_trajectory(
    corpus: &MatchCorpus,
    subject: &str,
    table: &RatingTable,
    weapons: &WeaponCatalog,
    settings: &RatingSettings,
) -> RatingTrajectory {
    let excluded: HashSet<PlayerId> = HashSet::new();
    let context = DuelContext::new(table, &excluded, settings.k_factor);
    let mut trajectory = RatingTrajectory::default();

    for record in corpus.deathmatch_type() {
        if !record.has_player(subject) {
            continue;
        }

        let classified = MatchWeapons::classify(record, weapons);
        let main = classified.main_weapon(subject);
        if main == UNKNOWN_WEAPON {
            debug!("Skipping match {}: no kills for {}", record.id, subject);
            continue;
        }

        let series = trajectory
            .by_weapon
            .entry(main.to_string())
            .or_insert_with(|| WeaponTrajectory::new(main, settings.baseline_rating));

        let delta = rating_gain(record, &classified, subject, series.current(), &context);
        series.push(&record.id, delta);
    }

    trajectory
}
