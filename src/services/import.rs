use anyhow::{Context, Result};
use log::{info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::settings::AppConfig;
use crate::database::{self, DbPool, matches};
use crate::domain::{ImportProgress, MatchResponse};
use crate::errors::with_parse_context;

pub struct ImportService {
    pool: DbPool,
}

impl ImportService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let pool = database::create_pool(&config.storage.database_path)?;
        Self::with_pool(pool)
    }

    pub fn with_pool(pool: DbPool) -> Result<Self> {
        database::ensure_schema(&mut database::get_connection(&pool)?)?;
        Ok(Self { pool })
    }

    /// Imports every `*.json` match file in `dir`, skipping matches already stored
    pub fn run(&self, dir: &Path) -> Result<ImportProgress> {
        info!("=== Starting Match Import ===\n");

        // Step 1: Discover files
        let files = discover_match_files(dir)?;
        info!("  → Found {} match files in {}\n", files.len(), dir.display());

        // Step 2: Store new matches
        let progress = self.import_files(&files)?;
        info!(
            "  → Imported {} new matches, {} already stored, {} failed\n",
            progress.imported(),
            progress.skipped(),
            progress.failed()
        );

        info!("=== Import Complete ===");
        Ok(progress)
    }

    /// Number of matches currently in the store
    pub fn stored_count(&self) -> Result<usize> {
        let mut conn = database::get_connection(&self.pool)?;
        matches::count(&mut conn)
    }

    fn import_files(&self, files: &[PathBuf]) -> Result<ImportProgress> {
        info!("Step 2: Importing matches...");

        let mut conn = database::get_connection(&self.pool)?;
        let mut stored: HashSet<String> = matches::list_ids(&mut conn)?;
        let mut progress = ImportProgress::new(files.len());

        for path in files {
            let response = match read_match_file(path) {
                Ok(response) => response,
                Err(e) => {
                    warn!("Skipping {}: {:#}", path.display(), e);
                    progress.increment_failed();
                    continue;
                }
            };

            if stored.contains(response.match_id()) {
                progress.increment_skipped();
                continue;
            }

            matches::upsert_match(&mut conn, &response)?;
            stored.insert(response.match_id().to_string());
            progress.increment_imported();
        }

        Ok(progress)
    }
}

fn discover_match_files(dir: &Path) -> Result<Vec<PathBuf>> {
    info!("Step 1: Discovering match files...");

    let entries = fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn read_match_file(path: &Path) -> Result<MatchResponse> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    with_parse_context(serde_json::from_str(&json), "match details")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::create_memory_pool;

    fn write_match(dir: &Path, file: &str, id: &str) {
        let json = serde_json::json!({
            "matchInfo": {"matchId": id, "queueID": "deathmatch", "gameStartMillis": 1_000},
            "players": [{"subject": "a"}]
        });
        fs::write(dir.join(file), json.to_string()).unwrap();
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_import_skips_stored_and_broken_files() {
        let dir = temp_dir("duelrank_test_import");
        write_match(&dir, "1.json", "m1");
        write_match(&dir, "2.json", "m2");
        write_match(&dir, "3.json", "m1");
        fs::write(dir.join("4.json"), "{ not json").unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let service = ImportService::with_pool(create_memory_pool().unwrap()).unwrap();
        let progress = service.run(&dir).unwrap();

        assert_eq!(progress.imported(), 2);
        assert_eq!(progress.skipped(), 1);
        assert_eq!(progress.failed(), 1);

        assert_eq!(service.stored_count().unwrap(), 2);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_second_import_only_skips() {
        let dir = temp_dir("duelrank_test_reimport");
        write_match(&dir, "1.json", "m1");
        let service = ImportService::with_pool(create_memory_pool().unwrap()).unwrap();

        service.run(&dir).unwrap();
        let progress = service.run(&dir).unwrap();

        assert_eq!(progress.imported(), 0);
        assert_eq!(progress.skipped(), 1);
        assert_eq!(service.stored_count().unwrap(), 1);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_directory_fails() {
        let service = ImportService::with_pool(create_memory_pool().unwrap()).unwrap();

        assert!(service.run(Path::new("/nonexistent/duelrank")).is_err());
    }
}
