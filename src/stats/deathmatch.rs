use chrono::{DateTime, Utc};
use log::debug;

use super::round2;
use super::running_average::RunningAverage;
use crate::config::settings::PerformanceSettings;
use crate::domain::{MatchCorpus, MatchRecord, Queue};
use crate::rating::main_weapon;
use crate::reference::{ReferenceData, WeaponCatalog};

#[derive(Debug, Clone, PartialEq)]
pub struct DeathmatchGame {
    pub match_id: String,
    pub date: DateTime<Utc>,
    pub map: String,
    pub agent: String,
    pub weapon: String,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub score: i64,
    pub avg_tier: f64,
    /// Name of the tier nearest to `avg_tier`
    pub lobby_rank: String,
    pub performance: f64,
    pub kd: f64,
    pub running_average: Option<f64>,
}

/// Mean tier of everyone but the subject, unranked players counted as the average tier
pub fn average_opponent_tier(record: &MatchRecord, subject: &str, average_tier: f64) -> f64 {
    let tiers: Vec<f64> = record
        .players
        .iter()
        .filter(|p| p.player_id != subject)
        .map(|p| p.tier.map(f64::from).unwrap_or(average_tier))
        .collect();

    if tiers.is_empty() {
        return average_tier;
    }
    round2(tiers.iter().sum::<f64>() / tiers.len() as f64)
}

/// Combined lobby-strength and weapon-cost weight
pub fn performance_weight(
    main_weapon: &str,
    avg_tier: f64,
    weapons: &WeaponCatalog,
    settings: &PerformanceSettings,
) -> f64 {
    let tier_weight =
        (settings.tier_damp + 1.0 / settings.average_tier) / (settings.tier_damp + 1.0 / avg_tier);

    let baseline_cost = weapons.cost_of(&settings.baseline_weapon).unwrap_or_default() as f64;
    let main_cost = weapons
        .cost_of(main_weapon)
        .map(f64::from)
        .unwrap_or(baseline_cost);
    let weapon_weight = (settings.weapon_damp + baseline_cost) / (settings.weapon_damp + main_cost);

    tier_weight * weapon_weight
}

pub fn deathmatch_game(
    record: &MatchRecord,
    subject: &str,
    reference: &ReferenceData,
    settings: &PerformanceSettings,
) -> Option<DeathmatchGame> {
    let me = record.player(subject)?;
    let weapon = main_weapon(record, subject, &reference.weapons);
    let avg_tier = average_opponent_tier(record, subject, settings.average_tier);

    let stats = &me.stats;
    let deaths = f64::from(stats.deaths.max(1));
    let weighted_kills = f64::from(stats.kills) + settings.assist_weight * f64::from(stats.assists);
    let weight = performance_weight(&weapon, avg_tier, &reference.weapons, settings);

    Some(DeathmatchGame {
        match_id: record.id.clone(),
        date: record.started_at,
        map: reference.maps.name(&record.map_id),
        agent: reference.agents.name(&me.character_id),
        weapon,
        kills: stats.kills,
        deaths: stats.deaths,
        assists: stats.assists,
        score: stats.score,
        avg_tier,
        lobby_rank: reference.tiers.name_for_average(avg_tier),
        performance: round2(weighted_kills * weight / deaths),
        kd: round2(f64::from(stats.kills) / deaths),
        running_average: None,
    })
}

/// Chronological deathmatch games of the subject, optionally limited to one
/// main weapon, with the running average of the performance score filled in.
pub fn deathmatch_games(
    corpus: &MatchCorpus,
    subject: &str,
    weapon: Option<&str>,
    reference: &ReferenceData,
    settings: &PerformanceSettings,
) -> Vec<DeathmatchGame> {
    let mut average = RunningAverage::new(settings.running_average);
    let mut games = Vec::new();

    for record in corpus.played_by(subject, Queue::Deathmatch) {
        let Some(mut game) = deathmatch_game(record, subject, reference, settings) else {
            continue;
        };
        if let Some(filter) = weapon
            && !game.weapon.eq_ignore_ascii_case(filter)
        {
            debug!("Skipping match {}: main weapon {}", game.match_id, game.weapon);
            continue;
        }

        game.running_average = average.push(game.performance);
        games.push(game);
    }

    games
}
