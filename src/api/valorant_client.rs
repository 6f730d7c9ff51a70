use crate::cache::Cache;
use crate::config::settings::ReferenceSettings;
use crate::http::RateLimitedClient;
use anyhow::{Result, bail};
use log::info;
use serde_json::Value;

/// Client for the public game-asset service (weapons, tiers, maps, agents)
pub struct ValorantApiClient {
    client: RateLimitedClient,
    base_url: String,
}

impl ValorantApiClient {
    pub fn new(settings: &ReferenceSettings) -> Result<Self> {
        let client = RateLimitedClient::new(
            settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
            settings.max_retries,
        )?;

        Ok(Self {
            client,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the `data` payload of one catalog endpoint
    pub async fn fetch_catalog(&mut self, key: &str) -> Result<Value> {
        let url = self.build_url(key);
        info!("Fetching {} from {}", key, url);

        let body = self.client.get_json(&url).await?;
        extract_data(body, key)
    }

    /// Fetch a catalog and store its payload in the raw cache.
    ///
    /// Returns the number of entries cached.
    pub async fn fetch_and_cache(&mut self, key: &str, cache: &Cache) -> Result<usize> {
        let data = self.fetch_catalog(key).await?;
        let entries = data.as_array().map_or(1, Vec::len);

        cache.save_raw(key, &data)?;
        Ok(entries)
    }

    fn build_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}

fn extract_data(mut body: Value, key: &str) -> Result<Value> {
    match body.get_mut("data").map(Value::take) {
        Some(Value::Null) | None => bail!("Response for '{}' has no data", key),
        Some(data) => Ok(data),
    }
}
