use std::collections::HashMap;

use super::record::{MatchRecord, Queue};

/// Collection of normalized matches indexed by match id
#[derive(Debug, Clone, Default)]
pub struct MatchCorpus {
    matches: HashMap<String, MatchRecord>,
}

impl MatchCorpus {
    pub fn new() -> Self {
        Self {
            matches: HashMap::new(),
        }
    }

    pub fn add(&mut self, record: MatchRecord) {
        self.matches.insert(record.id.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&MatchRecord> {
        self.matches.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.matches.contains_key(id)
    }

    /// All matches ordered by start time, ties broken by match id
    pub fn chronological(&self) -> Vec<&MatchRecord> {
        let mut records: Vec<&MatchRecord> = self.matches.values().collect();
        records.sort_by(|a, b| a.started_at.cmp(&b.started_at).then_with(|| a.id.cmp(&b.id)));
        records
    }

    /// Chronological matches of one queue type the player took part in
    pub fn played_by<'a>(&'a self, player_id: &str, queue: Queue) -> Vec<&'a MatchRecord> {
        self.chronological()
            .into_iter()
            .filter(|m| m.queue == queue && m.has_player(player_id))
            .collect()
    }

    /// Chronological deathmatch-type sub-corpus
    pub fn deathmatch_type(&self) -> Vec<&MatchRecord> {
        self.chronological()
            .into_iter()
            .filter(|m| m.queue.is_deathmatch_type())
            .collect()
    }
}

impl FromIterator<MatchRecord> for MatchCorpus {
    fn from_iter<I: IntoIterator<Item = MatchRecord>>(iter: I) -> Self {
        let mut corpus = MatchCorpus::new();
        for record in iter {
            corpus.add(record);
        }
        corpus
    }
}
