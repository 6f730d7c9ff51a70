use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct RatingSettings {
    pub k_factor: f64,
    pub baseline_rating: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            k_factor: 1.0,
            baseline_rating: 1000.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CalibrationSettings {
    pub min_gap: f64,
    pub nudge_step: f64,
    pub reference_weapon: String,
    pub max_iterations: Option<usize>,
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            min_gap: 10.0,
            nudge_step: 1.0,
            reference_weapon: "Vandal".to_string(),
            max_iterations: Some(1000),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PerformanceSettings {
    /// Tier assumed for unranked opponents (Silver 3)
    pub average_tier: f64,
    pub tier_damp: f64,
    pub weapon_damp: f64,
    pub baseline_weapon: String,
    pub assist_weight: f64,
    pub running_average: usize,
}

impl Default for PerformanceSettings {
    fn default() -> Self {
        Self {
            average_tier: 11.0,
            tier_damp: 1.0 / 22.0,
            weapon_damp: 6000.0,
            baseline_weapon: "Vandal".to_string(),
            assist_weight: 0.25,
            running_average: 50,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReferenceSettings {
    pub api_base_url: String,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub rate_limit_ms: u64,
    pub max_retries: u32,
}

impl Default for ReferenceSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://valorant-api.com/v1".to_string(),
            user_agent: "duelrank/0.1",
            timeout_secs: 30,
            rate_limit_ms: 100, // 10 req/sec
            max_retries: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub database_path: PathBuf,
    pub cache_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: env_path("DATABASE_PATH", "duelrank.db"),
            cache_dir: env_path("CACHE_DIR", "cache"),
        }
    }
}

fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var(var)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rating: RatingSettings,
    pub calibration: CalibrationSettings,
    pub performance: PerformanceSettings,
    pub reference: ReferenceSettings,
    pub storage: StorageSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            rating: RatingSettings::default(),
            calibration: CalibrationSettings::default(),
            performance: PerformanceSettings::default(),
            reference: ReferenceSettings::default(),
            storage: StorageSettings::default(),
        }
    }
}
