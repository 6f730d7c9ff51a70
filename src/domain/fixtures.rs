//! Builders for hand-written matches in unit tests.

use chrono::DateTime;

use super::record::{KillEvent, MatchRecord, PlayerEntry, PlayerStats, Queue, TeamResult};

pub struct MatchBuilder {
    record: MatchRecord,
}

impl MatchBuilder {
    pub fn new(id: &str, queue: Queue) -> Self {
        Self {
            record: MatchRecord {
                id: id.to_string(),
                queue,
                started_at: DateTime::default(),
                map_id: "/Game/Maps/Ascent/Ascent".to_string(),
                players: Vec::new(),
                teams: Vec::new(),
                kills: Vec::new(),
            },
        }
    }

    pub fn deathmatch(id: &str) -> Self {
        Self::new(id, Queue::Deathmatch)
    }

    pub fn competitive(id: &str) -> Self {
        Self::new(id, Queue::Competitive)
    }

    pub fn started_at(mut self, millis: i64) -> Self {
        self.record.started_at = DateTime::from_timestamp_millis(millis).unwrap_or_default();
        self
    }

    /// Adds a player; tier 0 means unranked
    pub fn player(self, id: &str, tier: u32) -> Self {
        self.player_on_team(id, tier, id)
    }

    pub fn player_on_team(mut self, id: &str, tier: u32, team_id: &str) -> Self {
        self.record.players.push(PlayerEntry {
            player_id: id.to_string(),
            tier: (tier != 0).then_some(tier),
            character_id: "agent-jett".to_string(),
            team_id: team_id.to_string(),
            stats: PlayerStats::default(),
        });
        self
    }

    pub fn stats(mut self, id: &str, kills: u32, deaths: u32, assists: u32) -> Self {
        if let Some(player) = self.record.players.iter_mut().find(|p| p.player_id == id) {
            player.stats = PlayerStats {
                kills,
                deaths,
                assists,
                score: i64::from(kills) * 100,
            };
        }
        self
    }

    pub fn team(mut self, team_id: &str, won: bool, rounds_won: u32, rounds_played: u32) -> Self {
        self.record.teams.push(TeamResult {
            team_id: team_id.to_string(),
            won,
            rounds_won,
            rounds_played,
        });
        self
    }

    pub fn kill(mut self, killer: &str, victim: &str, weapon_id: &str) -> Self {
        self.record.kills.push(KillEvent {
            killer: killer.to_string(),
            victim: victim.to_string(),
            weapon_id: weapon_id.to_string(),
        });
        self
    }

    pub fn kills(mut self, killer: &str, victim: &str, weapon_id: &str, count: usize) -> Self {
        for _ in 0..count {
            self = self.kill(killer, victim, weapon_id);
        }
        self
    }

    pub fn build(self) -> MatchRecord {
        self.record
    }
}
