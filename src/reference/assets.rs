use serde::Deserialize;
use std::collections::HashMap;

/// Map or agent entry as served by the reference API
#[derive(Debug, Deserialize)]
pub struct AssetResponse {
    pub uuid: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "mapUrl", default)]
    pub map_url: Option<String>,
}

/// Display names keyed by an identifier; unknown keys resolve to themselves
#[derive(Debug, Clone, Default)]
pub struct NameCatalog {
    names: HashMap<String, String>,
}

impl NameCatalog {
    pub fn new<I: IntoIterator<Item = (String, String)>>(entries: I) -> Self {
        Self {
            names: entries
                .into_iter()
                .map(|(key, name)| (key.to_lowercase(), name))
                .collect(),
        }
    }

    /// Maps keyed by their in-game map url
    pub fn maps(items: Vec<AssetResponse>) -> Self {
        Self::new(
            items
                .into_iter()
                .filter_map(|m| m.map_url.map(|url| (url, m.display_name))),
        )
    }

    /// Agents keyed by uuid
    pub fn agents(items: Vec<AssetResponse>) -> Self {
        Self::new(items.into_iter().map(|a| (a.uuid, a.display_name)))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, key: &str) -> String {
        self.names
            .get(&key.to_lowercase())
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets() -> Vec<AssetResponse> {
        serde_json::from_value(serde_json::json!([
            {"uuid": "7EAECC1B-4337-BBF6-6AB9-04B8F06B3319", "displayName": "Ascent", "mapUrl": "/Game/Maps/Ascent/Ascent"},
            {"uuid": "ee613ee9-28b7-4beb-9666-08db13bb2244", "displayName": "The Range", "mapUrl": null}
        ]))
        .unwrap()
    }

    #[test]
    fn test_maps_are_keyed_by_url() {
        let maps = NameCatalog::maps(assets());

        assert_eq!(maps.len(), 1);
        assert_eq!(maps.name("/Game/Maps/Ascent/Ascent"), "Ascent");
    }

    #[test]
    fn test_agents_are_keyed_by_uuid() {
        let agents = NameCatalog::agents(assets());

        assert_eq!(agents.name("7eaecc1b-4337-bbf6-6ab9-04b8f06b3319"), "Ascent");
        assert_eq!(agents.name("unknown-agent"), "unknown-agent");
    }
}
