use chrono::NaiveDateTime;

/// Row of the `matches` table; `data` holds the raw match-details JSON
#[derive(Debug, Clone)]
pub struct StoredMatch {
    pub id: String,
    pub queue: String,
    pub started_at: i64,
    pub data: String,
    pub created_at: Option<NaiveDateTime>,
}
