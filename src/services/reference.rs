use anyhow::Result;
use log::{error, info};

use crate::api::ValorantApiClient;
use crate::cache::Cache;
use crate::config::settings::AppConfig;
use crate::reference::{AGENTS_KEY, MAPS_KEY, TIERS_KEY, WEAPONS_KEY};

const CATALOG_KEYS: [&str; 4] = [WEAPONS_KEY, TIERS_KEY, MAPS_KEY, AGENTS_KEY];

pub struct ReferenceService {
    cache: Cache,
    api_client: ValorantApiClient,
}

impl ReferenceService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            cache: Cache::new(&config.storage.cache_dir)?,
            api_client: ValorantApiClient::new(&config.reference)?,
        })
    }

    /// Fetches every reference catalog into the cache.
    ///
    /// Catalogs already cached are kept unless `refresh` is set.
    pub async fn run(&mut self, refresh: bool) -> Result<()> {
        info!("=== Starting Reference Data Ingestion ===\n");

        if refresh {
            self.cache.clear()?;
            info!("  → Cleared cached reference data\n");
        }

        let mut failures = 0;
        for key in CATALOG_KEYS {
            if self.cache.exists(key) {
                info!("  → {} already cached", key);
                continue;
            }

            match self.api_client.fetch_and_cache(key, &self.cache).await {
                Ok(entries) => info!("  → Cached {} {}", entries, key),
                Err(e) => {
                    error!("Failed to ingest {}: {:#}", key, e);
                    failures += 1;
                }
            }
        }

        if failures > 0 {
            anyhow::bail!("{} of {} reference catalogs failed to download", failures, CATALOG_KEYS.len());
        }

        info!("=== Ingestion Complete ===");
        Ok(())
    }
}
