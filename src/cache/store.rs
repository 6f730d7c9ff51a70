use anyhow::{Context, Result};
use log::info;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{cache_context, parse_context};

/// File-based cache for reference payloads, one JSON file per key
pub struct Cache {
    cache_dir: PathBuf,
    raw_dir: PathBuf,
}

impl Cache {
    /// Create a new cache instance
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();
        let raw_dir = cache_dir.join("raw");

        fs::create_dir_all(&raw_dir).context("Failed to create raw cache directory")?;

        Ok(Self { cache_dir, raw_dir })
    }

    /// Save a raw API payload
    pub fn save_raw(&self, key: &str, data: &Value) -> Result<()> {
        let file_path = self.build_raw_path(key);
        let json = serde_json::to_string_pretty(data).context("Failed to serialize data")?;
        fs::write(&file_path, json).with_context(|| cache_context("write", key))?;
        info!("Saved raw data to cache: {}", file_path.display());
        Ok(())
    }

    /// Load a raw API payload
    pub fn load_raw(&self, key: &str) -> Result<Option<Value>> {
        let file_path = self.build_raw_path(key);
        if !file_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&file_path).with_context(|| cache_context("read", key))?;
        let value = serde_json::from_str(&json).with_context(|| {
            format!(
                "Failed to parse JSON from {:?}. First 200 chars: {}",
                file_path,
                json.chars().take(200).collect::<String>()
            )
        })?;
        Ok(Some(value))
    }

    /// Load a raw payload and map it onto a typed structure
    pub fn load_typed<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.load_raw(key)? {
            Some(value) => {
                let data = serde_json::from_value(value).with_context(|| parse_context(key))?;
                Ok(Some(data))
            }
            None => Ok(None),
        }
    }

    pub fn exists(&self, key: &str) -> bool {
        self.build_raw_path(key).exists()
    }

    /// Clear all cached data
    pub fn clear(&self) -> Result<()> {
        fs::remove_dir_all(&self.cache_dir).context("Failed to clear cache")?;
        fs::create_dir_all(&self.raw_dir).context("Failed to recreate cache directory")?;
        info!("Cleared cache directory");
        Ok(())
    }

    fn build_raw_path(&self, key: &str) -> PathBuf {
        self.raw_dir.join(format!("{}.json", key))
    }
}
