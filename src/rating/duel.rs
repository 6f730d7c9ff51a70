use std::collections::HashSet;

use super::expected::expected_score;
use super::main_weapon::{MatchWeapons, UNKNOWN_WEAPON};
use super::types::{DuelTally, RatingTable, RatingValue};
use crate::domain::{MatchRecord, PlayerId};

/// Parameters shared by every duel evaluation in a run
#[derive(Debug, Clone, Copy)]
pub struct DuelContext<'a> {
    pub table: &'a RatingTable,
    pub excluded: &'a HashSet<PlayerId>,
    pub k_factor: f64,
}

impl<'a> DuelContext<'a> {
    pub fn new(table: &'a RatingTable, excluded: &'a HashSet<PlayerId>, k_factor: f64) -> Self {
        Self {
            table,
            excluded,
            k_factor,
        }
    }

    fn is_excluded(&self, player_id: &str) -> bool {
        self.excluded.contains(player_id)
    }

    /// Rating of a participant's declared tier; unranked and unknown tiers have none
    fn opponent_rating(&self, record: &MatchRecord, player_id: &str) -> Option<RatingValue> {
        record
            .tier_of(player_id)
            .and_then(|tier| self.table.rating(tier))
    }
}

/// Expected and actual outcomes of the subject's same-weapon duels in one match.
///
/// A duel only counts when the kill weapon and the opponent's main weapon both
/// match the subject's main weapon, and the opponent has a ranked tier present
/// in the table.
pub fn duel_tally(
    record: &MatchRecord,
    weapons: &MatchWeapons,
    subject: &str,
    subject_rating: RatingValue,
    context: &DuelContext,
) -> DuelTally {
    let mut tally = DuelTally::default();

    let main = weapons.main_weapon(subject);
    if main == UNKNOWN_WEAPON {
        return tally;
    }

    for (index, kill) in record.kills.iter().enumerate() {
        if !kill.involves(subject) || kill.killer == kill.victim {
            continue;
        }
        if context.is_excluded(&kill.killer) || context.is_excluded(&kill.victim) {
            continue;
        }

        let subject_is_killer = kill.killer == subject;
        let opponent = if subject_is_killer { &kill.victim } else { &kill.killer };

        if weapons.main_weapon(opponent) != main || weapons.kill_weapon(index) != main {
            continue;
        }

        let Some(opponent_rating) = context.opponent_rating(record, opponent) else {
            continue;
        };

        let expected = expected_score(subject_rating, opponent_rating);
        if subject_is_killer {
            tally.record_win(expected);
        } else {
            tally.record_loss(expected);
        }
    }

    tally
}

/// Signed rating change for the subject from one match
pub fn rating_gain(
    record: &MatchRecord,
    weapons: &MatchWeapons,
    subject: &str,
    subject_rating: RatingValue,
    context: &DuelContext,
) -> RatingValue {
    duel_tally(record, weapons, subject, subject_rating, context).rating_delta(subject_rating, context.k_factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::MatchBuilder;
    use crate::rating::expected::expected_score;
    use crate::reference::fixtures::{PHANTOM, SHERIFF, VANDAL, weapons};

    fn table() -> RatingTable {
        RatingTable::from_pairs((3..=24).map(|t| (t, 1000.0 + (t as f64 - 11.0) * 50.0)), 10.0).unwrap()
    }

    fn gain(record: &MatchRecord, subject: &str, rating: f64, excluded: &HashSet<PlayerId>) -> f64 {
        let table = table();
        let context = DuelContext::new(&table, excluded, 1.0);
        let classified = MatchWeapons::classify(record, &weapons());
        rating_gain(record, &classified, subject, rating, &context)
    }

    #[test]
    fn test_single_same_weapon_kill_gains_half_a_point() {
        // "c" is only there so the opponent has Vandal kills of their own
        let record = MatchBuilder::deathmatch("m")
            .player("me", 10)
            .player("opp", 10)
            .player("c", 0)
            .kill("me", "opp", VANDAL)
            .kill("opp", "c", VANDAL)
            .build();

        let rating = table().rating(10).unwrap();
        let delta = gain(&record, "me", rating, &HashSet::new());

        assert!((delta - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_no_kill_events_gives_zero() {
        let record = MatchBuilder::deathmatch("m")
            .player("me", 10)
            .player("opp", 10)
            .kill("opp", "c", VANDAL)
            .build();

        assert_eq!(gain(&record, "me", 1000.0, &HashSet::new()), 0.0);
    }

    #[test]
    fn test_kills_with_off_weapon_do_not_count() {
        // Main weapon is Sheriff, but every duel against a Sheriff main used a Vandal
        let record = MatchBuilder::deathmatch("m")
            .player("me", 10)
            .player("opp", 10)
            .kills("me", "c", SHERIFF, 3)
            .kills("opp", "c", SHERIFF, 3)
            .kills("me", "opp", VANDAL, 2)
            .build();

        assert_eq!(gain(&record, "me", 950.0, &HashSet::new()), 0.0);
    }

    #[test]
    fn test_opponent_with_other_main_weapon_is_skipped() {
        let record = MatchBuilder::deathmatch("m")
            .player("me", 10)
            .player("opp", 10)
            .kills("me", "opp", VANDAL, 2)
            .kills("opp", "c", PHANTOM, 3)
            .build();

        assert_eq!(gain(&record, "me", 950.0, &HashSet::new()), 0.0);
    }

    #[test]
    fn test_deaths_add_expectation_only() {
        let record = MatchBuilder::deathmatch("m")
            .player("me", 10)
            .player("opp", 14)
            .kill("me", "opp", VANDAL)
            .kills("opp", "me", VANDAL, 2)
            .build();

        let table = table();
        let mine = table.rating(10).unwrap();
        let theirs = table.rating(14).unwrap();
        let expected = 3.0 * expected_score(mine, theirs);

        let delta = gain(&record, "me", mine, &HashSet::new());

        assert!((delta - (1.0 - expected)).abs() < 1e-12);
    }

    #[test]
    fn test_unranked_opponents_are_skipped() {
        let record = MatchBuilder::deathmatch("m")
            .player("me", 10)
            .player("opp", 0)
            .kill("me", "opp", VANDAL)
            .kill("opp", "me", VANDAL)
            .build();

        assert_eq!(gain(&record, "me", 950.0, &HashSet::new()), 0.0);
    }

    #[test]
    fn test_tiers_missing_from_table_are_skipped() {
        let record = MatchBuilder::deathmatch("m")
            .player("me", 10)
            .player("opp", 27)
            .kill("me", "opp", VANDAL)
            .kill("opp", "me", VANDAL)
            .build();

        assert_eq!(gain(&record, "me", 950.0, &HashSet::new()), 0.0);
    }

    #[test]
    fn test_excluded_players_contribute_nothing() {
        let record = MatchBuilder::deathmatch("m")
            .player("me", 10)
            .player("opp", 10)
            .player("other", 10)
            .kill("me", "opp", VANDAL)
            .kill("opp", "me", VANDAL)
            .kill("me", "other", VANDAL)
            .kill("other", "me", VANDAL)
            .build();

        let excluded: HashSet<PlayerId> = ["opp".to_string()].into_iter().collect();
        let delta = gain(&record, "me", 950.0, &excluded);

        // Only the win and loss against "other" remain: 1 - 2 * 0.5
        assert!(delta.abs() < 1e-12);

        let excluded_subject: HashSet<PlayerId> = ["me".to_string()].into_iter().collect();
        assert_eq!(gain(&record, "me", 950.0, &excluded_subject), 0.0);
    }

    #[test]
    fn test_k_factor_scales_the_delta() {
        let record = MatchBuilder::deathmatch("m")
            .player("me", 10)
            .player("opp", 10)
            .kills("me", "opp", VANDAL, 2)
            .kill("opp", "me", VANDAL)
            .build();
        let table = table();
        let excluded = HashSet::new();
        let classified = MatchWeapons::classify(&record, &weapons());
        let rating = table.rating(10).unwrap();

        let k1 = rating_gain(&record, &classified, "me", rating, &DuelContext::new(&table, &excluded, 1.0));
        let k16 = rating_gain(&record, &classified, "me", rating, &DuelContext::new(&table, &excluded, 16.0));

        assert!((k1 - 0.5).abs() < 1e-12);
        assert!((k16 - 8.0).abs() < 1e-12);
    }
}
