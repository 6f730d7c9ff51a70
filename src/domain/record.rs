use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::{MatchResponse, PlayerResponse};

pub type PlayerId = String;
pub type Tier = u32;

/// Queue a match was played in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Queue {
    Competitive,
    Deathmatch,
    TeamDeathmatch,
    Other,
}

impl Queue {
    pub fn from_id(queue_id: &str) -> Self {
        match queue_id {
            "competitive" => Queue::Competitive,
            "deathmatch" => Queue::Deathmatch,
            "hurm" | "team-deathmatch" | "teamdeathmatch" => Queue::TeamDeathmatch,
            _ => Queue::Other,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Queue::Competitive => "competitive",
            Queue::Deathmatch => "deathmatch",
            Queue::TeamDeathmatch => "team-deathmatch",
            Queue::Other => "other",
        }
    }

    /// Free-for-all style queues scored by the duel rating engine
    pub fn is_deathmatch_type(&self) -> bool {
        matches!(self, Queue::Deathmatch | Queue::TeamDeathmatch)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub player_id: PlayerId,
    /// Declared competitive tier, `None` when unranked
    pub tier: Option<Tier>,
    pub character_id: String,
    pub team_id: String,
    pub stats: PlayerStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamResult {
    pub team_id: String,
    pub won: bool,
    pub rounds_won: u32,
    pub rounds_played: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillEvent {
    pub killer: PlayerId,
    pub victim: PlayerId,
    pub weapon_id: String,
}

impl KillEvent {
    pub fn involves(&self, player_id: &str) -> bool {
        self.killer == player_id || self.victim == player_id
    }
}

/// Normalized match, read-only for everything downstream of the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: String,
    pub queue: Queue,
    pub started_at: DateTime<Utc>,
    pub map_id: String,
    pub players: Vec<PlayerEntry>,
    pub teams: Vec<TeamResult>,
    pub kills: Vec<KillEvent>,
}

impl MatchRecord {
    pub fn from_response(response: &MatchResponse) -> Self {
        let info = &response.match_info;

        Self {
            id: info.match_id.clone(),
            queue: Queue::from_id(&info.queue_id),
            started_at: DateTime::from_timestamp_millis(info.game_start_millis).unwrap_or_default(),
            map_id: info.map_id.clone(),
            players: response.players.iter().map(to_player_entry).collect(),
            teams: response
                .teams
                .iter()
                .map(|t| TeamResult {
                    team_id: t.team_id.clone(),
                    won: t.won,
                    rounds_won: t.rounds_won,
                    rounds_played: t.rounds_played,
                })
                .collect(),
            kills: response
                .kill_log()
                .into_iter()
                .map(|k| KillEvent {
                    killer: k.killer.clone(),
                    victim: k.victim.clone(),
                    weapon_id: k.finishing_damage.damage_item.to_lowercase(),
                })
                .collect(),
        }
    }

    pub fn player(&self, player_id: &str) -> Option<&PlayerEntry> {
        self.players.iter().find(|p| p.player_id == player_id)
    }

    pub fn has_player(&self, player_id: &str) -> bool {
        self.player(player_id).is_some()
    }

    /// Declared tier of a participant, `None` when unranked or absent
    pub fn tier_of(&self, player_id: &str) -> Option<Tier> {
        self.player(player_id).and_then(|p| p.tier)
    }

    pub fn winning_team(&self) -> Option<&TeamResult> {
        self.teams.iter().find(|t| t.won)
    }
}

fn to_player_entry(player: &PlayerResponse) -> PlayerEntry {
    let stats = player.stats.clone().unwrap_or_default();

    PlayerEntry {
        player_id: player.subject.clone(),
        tier: player.competitive_tier.filter(|&t| t != 0),
        character_id: player.character_id.to_lowercase(),
        team_id: player.team_id.clone(),
        stats: PlayerStats {
            kills: stats.kills,
            deaths: stats.deaths,
            assists: stats.assists,
            score: stats.score,
        },
    }
}
