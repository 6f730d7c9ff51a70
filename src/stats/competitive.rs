use chrono::{DateTime, Utc};

use crate::domain::{MatchCorpus, MatchRecord, Queue, Tier};
use crate::reference::ReferenceData;

#[derive(Debug, Clone, PartialEq)]
pub struct CompetitiveGame {
    pub match_id: String,
    pub date: DateTime<Utc>,
    pub map: String,
    pub agent: String,
    pub rank: String,
    pub rank_raw: Option<Tier>,
    pub result: String,
    /// Lobby estimate from the other ranked players, absent when none are ranked
    pub mmr: Option<LobbyEstimate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LobbyEstimate {
    pub name: String,
    pub raw: f64,
    pub progress: u32,
}

/// `Win w-l`, `Loss l-w` or `Draw w-l` from the first team's round counts
pub fn match_result(record: &MatchRecord, team_id: &str) -> String {
    let (won, lost) = record
        .teams
        .first()
        .map(|t| (t.rounds_won, t.rounds_played.saturating_sub(t.rounds_won)))
        .unwrap_or_default();
    let (high, low) = (won.max(lost), won.min(lost));

    match record.winning_team() {
        None => format!("Draw {}-{}", high, low),
        Some(winner) if winner.team_id == team_id => format!("Win {}-{}", high, low),
        Some(_) => format!("Loss {}-{}", low, high),
    }
}

pub fn lobby_estimate(record: &MatchRecord, subject: &str, reference: &ReferenceData) -> Option<LobbyEstimate> {
    let tiers: Vec<f64> = record
        .players
        .iter()
        .filter(|p| p.player_id != subject)
        .filter_map(|p| p.tier.map(f64::from))
        .collect();
    if tiers.is_empty() {
        return None;
    }

    let raw = tiers.iter().sum::<f64>() / tiers.len() as f64;
    Some(LobbyEstimate {
        name: reference.tiers.name(raw.floor() as Tier),
        raw,
        progress: ((raw - raw.floor()) * 100.0).floor() as u32,
    })
}

pub fn competitive_games(corpus: &MatchCorpus, subject: &str, reference: &ReferenceData) -> Vec<CompetitiveGame> {
    corpus
        .played_by(subject, Queue::Competitive)
        .into_iter()
        .filter_map(|record| {
            let me = record.player(subject)?;
            Some(CompetitiveGame {
                match_id: record.id.clone(),
                date: record.started_at,
                map: reference.maps.name(&record.map_id),
                agent: reference.agents.name(&me.character_id),
                rank: reference.tiers.name(me.tier.unwrap_or(0)),
                rank_raw: me.tier,
                result: match_result(record, &me.team_id),
                mmr: lobby_estimate(record, subject, reference),
            })
        })
        .collect()
}
