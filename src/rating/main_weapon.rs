use std::collections::HashMap;

use crate::domain::{MatchRecord, PlayerId};
use crate::reference::WeaponCatalog;

/// Main weapon of a player without any kills
pub const UNKNOWN_WEAPON: &str = "Unknown";

/// Display name of the weapon behind most of a player's kills in one match.
///
/// Ties go to the weapon that appears first in the kill log.
pub fn main_weapon(record: &MatchRecord, player_id: &str, weapons: &WeaponCatalog) -> String {
    let kill_weapons = record
        .kills
        .iter()
        .filter(|k| k.killer == player_id)
        .map(|k| k.weapon_id.as_str());

    match plurality(kill_weapons) {
        Some(weapon_id) => weapons.display_name(weapon_id),
        None => UNKNOWN_WEAPON.to_string(),
    }
}

fn plurality<'a, I: Iterator<Item = &'a str>>(items: I) -> Option<&'a str> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(id, _)| *id == item) {
            Some((_, count)) => *count += 1,
            None => counts.push((item, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (id, count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((id, count));
        }
    }
    best.map(|(id, _)| id)
}

/// Weapon names for one match: every participant's main weapon and every kill's weapon
#[derive(Debug, Clone, Default)]
pub struct MatchWeapons {
    main: HashMap<PlayerId, String>,
    kill_names: Vec<String>,
}

impl MatchWeapons {
    pub fn classify(record: &MatchRecord, weapons: &WeaponCatalog) -> Self {
        let mut participants: Vec<&str> = record.players.iter().map(|p| p.player_id.as_str()).collect();
        for kill in &record.kills {
            for id in [kill.killer.as_str(), kill.victim.as_str()] {
                if !participants.contains(&id) {
                    participants.push(id);
                }
            }
        }

        let main = participants
            .into_iter()
            .map(|id| (id.to_string(), main_weapon(record, id, weapons)))
            .collect();

        let kill_names = record
            .kills
            .iter()
            .map(|k| weapons.display_name(&k.weapon_id))
            .collect();

        Self { main, kill_names }
    }

    pub fn main_weapon(&self, player_id: &str) -> &str {
        self.main.get(player_id).map(String::as_str).unwrap_or(UNKNOWN_WEAPON)
    }

    /// Weapon name of the kill at `index` in the match's kill log
    pub fn kill_weapon(&self, index: usize) -> &str {
        self.kill_names.get(index).map(String::as_str).unwrap_or(UNKNOWN_WEAPON)
    }
}

/// Memoized weapon classification for a set of matches, keyed by match id
#[derive(Debug, Clone, Default)]
pub struct MainWeaponIndex {
    by_match: HashMap<String, MatchWeapons>,
}

impl MainWeaponIndex {
    pub fn build<'a, I>(records: I, weapons: &WeaponCatalog) -> Self
    where
        I: IntoIterator<Item = &'a MatchRecord>,
    {
        Self {
            by_match: records
                .into_iter()
                .map(|r| (r.id.clone(), MatchWeapons::classify(r, weapons)))
                .collect(),
        }
    }

    pub fn get(&self, match_id: &str) -> Option<&MatchWeapons> {
        self.by_match.get(match_id)
    }

    pub fn len(&self) -> usize {
        self.by_match.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_match.is_empty()
    }
}
