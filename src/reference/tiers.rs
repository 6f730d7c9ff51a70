use serde::Deserialize;
use std::collections::BTreeMap;

use crate::domain::Tier;

const BUILTIN_TIERS: [(Tier, &str); 23] = [
    (0, "Unranked"),
    (3, "Iron 1"),
    (4, "Iron 2"),
    (5, "Iron 3"),
    (6, "Bronze 1"),
    (7, "Bronze 2"),
    (8, "Bronze 3"),
    (9, "Silver 1"),
    (10, "Silver 2"),
    (11, "Silver 3"),
    (12, "Gold 1"),
    (13, "Gold 2"),
    (14, "Gold 3"),
    (15, "Platinum 1"),
    (16, "Platinum 2"),
    (17, "Platinum 3"),
    (18, "Diamond 1"),
    (19, "Diamond 2"),
    (20, "Diamond 3"),
    (21, "Immortal 1"),
    (22, "Immortal 2"),
    (23, "Immortal 3"),
    (24, "Radiant"),
];

/// Competitive tier episode as served by the reference API
#[derive(Debug, Deserialize)]
pub struct TierEpisodeResponse {
    #[serde(default)]
    pub tiers: Vec<TierResponse>,
}

#[derive(Debug, Deserialize)]
pub struct TierResponse {
    pub tier: Tier,
    #[serde(rename = "tierName")]
    pub tier_name: String,
}

#[derive(Debug, Clone)]
pub struct TierCatalog {
    names: BTreeMap<Tier, String>,
}

impl TierCatalog {
    pub fn builtin() -> Self {
        Self {
            names: BUILTIN_TIERS
                .iter()
                .map(|(tier, name)| (*tier, name.to_string()))
                .collect(),
        }
    }

    /// Uses the latest episode; falls back to the builtin names when it is empty
    pub fn from_response(episodes: Vec<TierEpisodeResponse>) -> Self {
        let Some(latest) = episodes.into_iter().last().filter(|e| !e.tiers.is_empty()) else {
            return Self::builtin();
        };

        Self {
            names: latest
                .tiers
                .into_iter()
                .map(|t| (t.tier, title_case(&t.tier_name)))
                .collect(),
        }
    }

    pub fn name(&self, tier: Tier) -> String {
        self.names
            .get(&tier)
            .cloned()
            .unwrap_or_else(|| format!("Tier {}", tier))
    }

    /// Name of the tier nearest to a fractional tier value
    pub fn name_for_average(&self, tier: f64) -> String {
        self.name(tier.round().max(0.0) as Tier)
    }
}

impl Default for TierCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names() {
        let tiers = TierCatalog::builtin();

        assert_eq!(tiers.name(0), "Unranked");
        assert_eq!(tiers.name(11), "Silver 3");
        assert_eq!(tiers.name(24), "Radiant");
        assert_eq!(tiers.name(99), "Tier 99");
    }

    #[test]
    fn test_name_for_average_rounds() {
        let tiers = TierCatalog::builtin();

        assert_eq!(tiers.name_for_average(11.6), "Gold 1");
        assert_eq!(tiers.name_for_average(11.4), "Silver 3");
    }

    #[test]
    fn test_from_response_uses_latest_episode() {
        let episodes: Vec<TierEpisodeResponse> = serde_json::from_value(serde_json::json!([
            {"tiers": [{"tier": 3, "tierName": "IRON 1"}]},
            {"tiers": [{"tier": 3, "tierName": "IRON 1"}, {"tier": 27, "tierName": "RADIANT"}]}
        ]))
        .unwrap();

        let tiers = TierCatalog::from_response(episodes);

        assert_eq!(tiers.name(3), "Iron 1");
        assert_eq!(tiers.name(27), "Radiant");
    }
}
