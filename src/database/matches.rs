use anyhow::{Context, Result};
use rusqlite::params;
use std::collections::HashSet;

use super::connection::DbConn;
use super::models::StoredMatch;
use crate::domain::{MatchRecord, MatchResponse, Queue};
use crate::errors::{store_context, with_parse_context};

/// Inserts or replaces a raw match, keyed by its match id
pub fn upsert_match(conn: &mut DbConn, response: &MatchResponse) -> Result<()> {
    let id = response.match_id();
    let queue = Queue::from_id(&response.match_info.queue_id);
    let data = serde_json::to_string(response).with_context(|| store_context("serialize", id))?;

    let sql = "INSERT INTO matches (id, queue, started_at, data) VALUES (?1, ?2, ?3, ?4) \
               ON CONFLICT(id) DO UPDATE SET queue = excluded.queue, started_at = excluded.started_at, data = excluded.data";

    conn.execute(
        sql,
        params![id, queue.as_str(), response.match_info.game_start_millis, data],
    )
    .with_context(|| store_context("upsert", id))?;

    Ok(())
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<StoredMatch> {
    Ok(StoredMatch {
        id: row.get(0)?,
        queue: row.get(1)?,
        started_at: row.get(2)?,
        data: row.get(3)?,
        created_at: row.get(4)?,
    })
}

pub fn list_ids(conn: &mut DbConn) -> Result<HashSet<String>> {
    let mut stmt = conn.prepare("SELECT id FROM matches")?;
    let ids = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<HashSet<String>>>()?;

    Ok(ids)
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<StoredMatch>> {
    let sql = "SELECT id, queue, started_at, data, created_at FROM matches ORDER BY started_at, id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Every stored match, normalized
pub fn load_records(conn: &mut DbConn) -> Result<Vec<MatchRecord>> {
    list_all(conn)?
        .iter()
        .map(|stored| {
            let response: MatchResponse = with_parse_context(
                serde_json::from_str(&stored.data),
                &format!("stored match {}", stored.id),
            )?;
            Ok(MatchRecord::from_response(&response))
        })
        .collect()
}

pub fn count(conn: &mut DbConn) -> Result<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM matches", [], |row| row.get(0))
        .context("Failed to count matches")?;

    Ok(count as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::{DbPool, create_memory_pool, get_connection};
    use crate::database::setup::ensure_schema;

    fn setup() -> DbPool {
        let pool = create_memory_pool().unwrap();
        ensure_schema(&mut get_connection(&pool).unwrap()).unwrap();
        pool
    }

    fn response(id: &str, queue: &str, started_at: i64) -> MatchResponse {
        serde_json::from_value(serde_json::json!({
            "matchInfo": {"matchId": id, "queueID": queue, "gameStartMillis": started_at},
            "players": [{"subject": "a", "competitiveTier": 12}],
            "kills": [{"killer": "a", "victim": "b", "finishingDamage": {"damageItem": "VANDAL-ID"}}]
        }))
        .unwrap()
    }

    #[test]
    fn test_upsert_and_load() {
        let pool = setup();
        let mut conn = get_connection(&pool).unwrap();

        upsert_match(&mut conn, &response("m2", "competitive", 2_000)).unwrap();
        upsert_match(&mut conn, &response("m1", "deathmatch", 1_000)).unwrap();

        let records = load_records(&mut conn).unwrap();

        assert_eq!(count(&mut conn).unwrap(), 2);
        assert_eq!(records[0].id, "m1");
        assert_eq!(records[0].queue, Queue::Deathmatch);
        assert_eq!(records[0].kills[0].weapon_id, "vandal-id");
        assert_eq!(records[1].tier_of("a"), Some(12));
    }

    #[test]
    fn test_upsert_replaces_existing() {
        let pool = setup();
        let mut conn = get_connection(&pool).unwrap();

        upsert_match(&mut conn, &response("m1", "deathmatch", 1_000)).unwrap();
        upsert_match(&mut conn, &response("m1", "competitive", 5_000)).unwrap();

        let all = list_all(&mut conn).unwrap();
        let stored = &all[0];
        assert_eq!(count(&mut conn).unwrap(), 1);
        assert_eq!(stored.queue, "competitive");
        assert_eq!(stored.started_at, 5_000);
        assert!(stored.created_at.is_some());
    }

    #[test]
    fn test_list_ids() {
        let pool = setup();
        let mut conn = get_connection(&pool).unwrap();
        upsert_match(&mut conn, &response("m1", "deathmatch", 1_000)).unwrap();

        let ids = list_ids(&mut conn).unwrap();

        assert!(ids.contains("m1"));
        assert!(!ids.contains("missing"));
    }
}
