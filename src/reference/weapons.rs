use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Weapon {
    pub uuid: String,
    pub name: String,
    pub cost: u32,
}

impl Weapon {
    pub fn new(uuid: &str, name: &str, cost: u32) -> Self {
        Self {
            uuid: uuid.to_lowercase(),
            name: name.to_string(),
            cost,
        }
    }
}

/// Weapon entry as served by the reference API
#[derive(Debug, Deserialize)]
pub struct WeaponResponse {
    pub uuid: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "shopData", default)]
    pub shop_data: Option<ShopData>,
}

#[derive(Debug, Deserialize)]
pub struct ShopData {
    #[serde(default)]
    pub cost: u32,
}

/// Weapon lookups keyed by uuid, with a fallback weapon for unknown ids
#[derive(Debug, Clone, Default)]
pub struct WeaponCatalog {
    by_uuid: HashMap<String, Weapon>,
    fallback_uuid: Option<String>,
}

impl WeaponCatalog {
    pub fn new(weapons: Vec<Weapon>, fallback_name: &str) -> Self {
        let fallback_uuid = weapons
            .iter()
            .find(|w| w.name.eq_ignore_ascii_case(fallback_name))
            .map(|w| w.uuid.clone());

        let by_uuid = weapons.into_iter().map(|w| (w.uuid.clone(), w)).collect();

        Self {
            by_uuid,
            fallback_uuid,
        }
    }

    pub fn from_response(items: Vec<WeaponResponse>, fallback_name: &str) -> Self {
        let weapons = items
            .into_iter()
            .map(|item| {
                let cost = item.shop_data.map(|s| s.cost).unwrap_or(0);
                Weapon::new(&item.uuid, &item.display_name, cost)
            })
            .collect();
        Self::new(weapons, fallback_name)
    }

    pub fn len(&self) -> usize {
        self.by_uuid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_uuid.is_empty()
    }

    pub fn by_uuid(&self, uuid: &str) -> Option<&Weapon> {
        self.by_uuid.get(&uuid.to_lowercase())
    }

    pub fn by_name(&self, name: &str) -> Option<&Weapon> {
        self.by_uuid.values().find(|w| w.name.eq_ignore_ascii_case(name))
    }

    /// Weapon for a uuid, or the fallback weapon when the uuid is unknown
    pub fn resolve(&self, uuid: &str) -> Option<&Weapon> {
        self.by_uuid(uuid).or_else(|| {
            self.fallback_uuid
                .as_ref()
                .and_then(|fallback| self.by_uuid.get(fallback))
        })
    }

    pub fn display_name(&self, uuid: &str) -> String {
        self.resolve(uuid)
            .map(|w| w.name.clone())
            .unwrap_or_else(|| uuid.to_string())
    }

    pub fn cost_of(&self, name: &str) -> Option<u32> {
        self.by_name(name).map(|w| w.cost)
    }
}
