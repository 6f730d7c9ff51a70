use anyhow::{Result, bail};
use log::info;
use std::collections::HashSet;
use std::path::Path;

use crate::cache::Cache;
use crate::config::seed::resolve_table;
use crate::config::settings::AppConfig;
use crate::database::{self, DbPool, matches};
use crate::domain::{MatchCorpus, PlayerId};
use crate::rating::{self, BiasScorer, CalibrationOutcome, RatingTrajectory};
use crate::reference::ReferenceData;
use crate::stats::{self, CompetitiveGame, DeathmatchGame};

/// Read-only analyses over the stored match corpus
pub struct AnalysisService {
    config: AppConfig,
    pool: DbPool,
    cache: Cache,
}

impl AnalysisService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let pool = database::create_pool(&config.storage.database_path)?;
        let cache = Cache::new(&config.storage.cache_dir)?;
        Self::with_parts(config, pool, cache)
    }

    pub fn with_parts(config: AppConfig, pool: DbPool, cache: Cache) -> Result<Self> {
        database::ensure_schema(&mut database::get_connection(&pool)?)?;
        Ok(Self { config, pool, cache })
    }

    pub fn load_corpus(&self) -> Result<MatchCorpus> {
        let mut conn = database::get_connection(&self.pool)?;
        let corpus: MatchCorpus = matches::load_records(&mut conn)?.into_iter().collect();
        info!("  → Loaded {} matches from the store", corpus.len());
        Ok(corpus)
    }

    pub fn load_reference(&self) -> Result<ReferenceData> {
        ReferenceData::load(&self.cache, &self.config.performance.baseline_weapon)
    }

    pub fn performance(&self, player: &str, weapon: Option<&str>) -> Result<Vec<DeathmatchGame>> {
        let corpus = self.load_corpus()?;
        let reference = self.load_reference()?;

        Ok(stats::deathmatch_games(
            &corpus,
            player,
            weapon,
            &reference,
            &self.config.performance,
        ))
    }

    pub fn competitive(&self, player: &str) -> Result<Vec<CompetitiveGame>> {
        let corpus = self.load_corpus()?;
        let reference = self.load_reference()?;

        Ok(stats::competitive_games(&corpus, player, &reference))
    }

    pub fn trajectory(&self, player: &str, table: Option<&Path>) -> Result<RatingTrajectory> {
        let table = resolve_table(table, self.config.calibration.min_gap)?;
        let corpus = self.load_corpus()?;
        let reference = self.load_reference()?;

        Ok(rating::build_trajectory(
            &corpus,
            player,
            &table,
            &reference.weapons,
            &self.config.rating,
        ))
    }

    /// Calibrates the rating table against the deathmatch-type sub-corpus
    pub fn calibrate(
        &self,
        excluded: &[PlayerId],
        table: Option<&Path>,
        max_iterations: Option<usize>,
    ) -> Result<CalibrationOutcome> {
        info!("=== Starting Calibration ===\n");

        let mut settings = self.config.calibration.clone();
        if max_iterations.is_some() {
            settings.max_iterations = max_iterations;
        }

        // Step 1: Inputs
        let initial = resolve_table(table, settings.min_gap)?;
        let corpus = self.load_corpus()?;
        let reference = self.load_reference()?;
        if reference.weapons.is_empty() {
            bail!("No weapon catalog cached, run `ingest` first");
        }

        // Step 2: Score and search
        let excluded: HashSet<PlayerId> = excluded.iter().cloned().collect();
        let scorer = BiasScorer::new(
            corpus.deathmatch_type(),
            &reference.weapons,
            excluded,
            &settings.reference_weapon,
            self.config.rating.k_factor,
        );
        info!(
            "  → Scoring {} deathmatch-type matches on {}\n",
            scorer.match_count(),
            scorer.reference_weapon()
        );

        let outcome = rating::calibrate(&scorer, initial, &settings);

        info!("=== Calibration Complete ===");
        Ok(outcome)
    }
}
