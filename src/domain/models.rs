use serde::{Deserialize, Serialize};

// --- API Response Structures ---

/// Raw match-details response from the game service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchResponse {
    #[serde(rename = "matchInfo")]
    pub match_info: MatchInfo,
    #[serde(default)]
    pub players: Vec<PlayerResponse>,
    #[serde(default)]
    pub teams: Vec<TeamResponse>,
    #[serde(rename = "roundResults", default)]
    pub round_results: Vec<RoundResponse>,
    #[serde(default)]
    pub kills: Vec<KillResponse>,
}

impl MatchResponse {
    pub fn match_id(&self) -> &str {
        &self.match_info.match_id
    }

    /// Kill log for the whole match.
    ///
    /// Prefers the top-level kill list and falls back to the per-round player stats.
    pub fn kill_log(&self) -> Vec<&KillResponse> {
        if !self.kills.is_empty() {
            return self.kills.iter().collect();
        }

        self.round_results
            .iter()
            .flat_map(|round| round.player_stats.iter())
            .flat_map(|stats| stats.kills.iter())
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchInfo {
    #[serde(rename = "matchId")]
    pub match_id: String,
    #[serde(rename = "queueID", default)]
    pub queue_id: String,
    #[serde(rename = "gameStartMillis", default)]
    pub game_start_millis: i64,
    #[serde(rename = "mapId", default)]
    pub map_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerResponse {
    pub subject: String,
    #[serde(rename = "characterId", default)]
    pub character_id: String,
    #[serde(rename = "teamId", default)]
    pub team_id: String,
    #[serde(rename = "competitiveTier", default)]
    pub competitive_tier: Option<u32>,
    #[serde(default)]
    pub stats: Option<PlayerStatsResponse>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlayerStatsResponse {
    #[serde(default)]
    pub kills: u32,
    #[serde(default)]
    pub deaths: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub score: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeamResponse {
    #[serde(rename = "teamId")]
    pub team_id: String,
    #[serde(default)]
    pub won: bool,
    #[serde(rename = "roundsWon", default)]
    pub rounds_won: u32,
    #[serde(rename = "roundsPlayed", default)]
    pub rounds_played: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoundResponse {
    #[serde(rename = "playerStats", default)]
    pub player_stats: Vec<RoundPlayerStats>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoundPlayerStats {
    pub subject: String,
    #[serde(default)]
    pub kills: Vec<KillResponse>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KillResponse {
    pub killer: String,
    pub victim: String,
    #[serde(rename = "finishingDamage", default)]
    pub finishing_damage: FinishingDamage,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FinishingDamage {
    #[serde(rename = "damageType", default)]
    pub damage_type: String,
    #[serde(rename = "damageItem", default)]
    pub damage_item: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEATHMATCH_JSON: &str = r#"{
        "matchInfo": {"matchId": "m-1", "queueID": "deathmatch", "gameStartMillis": 1650000000000, "mapId": "/Game/Maps/Ascent/Ascent"},
        "players": [
            {"subject": "a", "characterId": "agent-1", "teamId": "a", "competitiveTier": 10,
             "stats": {"kills": 2, "deaths": 1, "assists": 0, "score": 200}},
            {"subject": "b", "characterId": "agent-2", "teamId": "b"}
        ],
        "roundResults": [
            {"playerStats": [
                {"subject": "a", "kills": [
                    {"killer": "a", "victim": "b", "finishingDamage": {"damageType": "Weapon", "damageItem": "VANDAL-ID"}},
                    {"killer": "a", "victim": "b", "finishingDamage": {"damageType": "Weapon", "damageItem": "VANDAL-ID"}}
                ]},
                {"subject": "b", "kills": [
                    {"killer": "b", "victim": "a", "finishingDamage": {"damageType": "Weapon", "damageItem": "phantom-id"}}
                ]}
            ]}
        ],
        "someUnknownField": {"ignored": true}
    }"#;

    #[test]
    fn test_parses_match_details() {
        let response: MatchResponse = serde_json::from_str(DEATHMATCH_JSON).unwrap();

        assert_eq!(response.match_id(), "m-1");
        assert_eq!(response.match_info.queue_id, "deathmatch");
        assert_eq!(response.players.len(), 2);
        assert_eq!(response.players[0].competitive_tier, Some(10));
        assert!(response.players[1].stats.is_none());
        assert!(response.teams.is_empty());
    }

    #[test]
    fn test_kill_log_flattens_rounds_without_top_level_kills() {
        let response: MatchResponse = serde_json::from_str(DEATHMATCH_JSON).unwrap();

        let log = response.kill_log();

        assert_eq!(log.len(), 3);
        assert_eq!(log[2].killer, "b");
    }

    #[test]
    fn test_kill_log_prefers_top_level_kills() {
        let mut response: MatchResponse = serde_json::from_str(DEATHMATCH_JSON).unwrap();
        response.kills = vec![KillResponse {
            killer: "b".to_string(),
            victim: "a".to_string(),
            finishing_damage: FinishingDamage::default(),
        }];

        assert_eq!(response.kill_log().len(), 1);
    }
}
