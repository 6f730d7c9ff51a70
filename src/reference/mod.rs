mod assets;
mod tiers;
mod weapons;

pub use assets::{AssetResponse, NameCatalog};
pub use tiers::{TierCatalog, TierEpisodeResponse, TierResponse};
pub use weapons::{Weapon, WeaponCatalog, WeaponResponse};

use anyhow::Result;
use log::{info, warn};
use serde::de::DeserializeOwned;

use crate::cache::Cache;

pub const WEAPONS_KEY: &str = "weapons";
pub const TIERS_KEY: &str = "competitivetiers";
pub const MAPS_KEY: &str = "maps";
pub const AGENTS_KEY: &str = "agents";

/// Reference catalogs, populated once at startup and read-only afterwards
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub weapons: WeaponCatalog,
    pub tiers: TierCatalog,
    pub maps: NameCatalog,
    pub agents: NameCatalog,
}

impl ReferenceData {
    pub fn new(weapons: WeaponCatalog) -> Self {
        Self {
            weapons,
            ..Self::default()
        }
    }

    /// Build catalogs from the raw cache; missing payloads give empty catalogs
    pub fn load(cache: &Cache, baseline_weapon: &str) -> Result<Self> {
        let weapons = match load_payload::<Vec<WeaponResponse>>(cache, WEAPONS_KEY)? {
            Some(items) => WeaponCatalog::from_response(items, baseline_weapon),
            None => WeaponCatalog::default(),
        };
        let tiers = match load_payload::<Vec<TierEpisodeResponse>>(cache, TIERS_KEY)? {
            Some(episodes) => TierCatalog::from_response(episodes),
            None => TierCatalog::builtin(),
        };
        let maps = load_payload::<Vec<AssetResponse>>(cache, MAPS_KEY)?
            .map(NameCatalog::maps)
            .unwrap_or_default();
        let agents = load_payload::<Vec<AssetResponse>>(cache, AGENTS_KEY)?
            .map(NameCatalog::agents)
            .unwrap_or_default();

        info!(
            "Loaded reference data: {} weapons, {} maps, {} agents",
            weapons.len(),
            maps.len(),
            agents.len()
        );

        Ok(Self {
            weapons,
            tiers,
            maps,
            agents,
        })
    }
}

fn load_payload<T: DeserializeOwned>(cache: &Cache, key: &str) -> Result<Option<T>> {
    let payload = cache.load_typed(key)?;
    if payload.is_none() {
        warn!("No cached reference data for '{}', run `ingest` first", key);
    }
    Ok(payload)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub const VANDAL: &str = "vandal-id";
    pub const PHANTOM: &str = "phantom-id";
    pub const SHERIFF: &str = "sheriff-id";
    pub const GHOST: &str = "ghost-id";

    pub fn weapons() -> WeaponCatalog {
        WeaponCatalog::new(
            vec![
                Weapon::new(VANDAL, "Vandal", 2900),
                Weapon::new(PHANTOM, "Phantom", 2900),
                Weapon::new(SHERIFF, "Sheriff", 800),
                Weapon::new(GHOST, "Ghost", 500),
            ],
            "Vandal",
        )
    }

    pub fn reference() -> ReferenceData {
        ReferenceData::new(weapons())
    }
}
