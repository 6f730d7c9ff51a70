use log::{debug, info};

use super::bias::{BiasReport, BiasScorer};
use super::types::RatingTable;
use crate::config::settings::CalibrationSettings;
use crate::domain::Tier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Initial,
    Iterating,
    Converged,
}

#[derive(Debug, Clone)]
pub struct CalibrationOutcome {
    pub table: RatingTable,
    pub report: BiasReport,
    /// Accepted improvements
    pub iterations: usize,
    /// Total bias after setup and after every accepted step
    pub score_history: Vec<f64>,
    /// True when the iteration cap stopped the search before convergence
    pub capped: bool,
}

/// Greedy coordinate search over a rating table.
///
/// Each step nudges every biased tier once against its bias and keeps the single
/// candidate with the lowest total bias, as long as it strictly improves.
pub struct CalibrationSearch<'s, 'a> {
    scorer: &'s BiasScorer<'a>,
    min_gap: f64,
    nudge_step: f64,
    state: SearchState,
    best_table: RatingTable,
    best_report: BiasReport,
    iterations: usize,
    score_history: Vec<f64>,
}

impl<'s, 'a> CalibrationSearch<'s, 'a> {
    pub fn new(scorer: &'s BiasScorer<'a>, initial: RatingTable, settings: &CalibrationSettings) -> Self {
        let best_report = scorer.score(&initial);
        info!("Initial total bias: {:.4}", best_report.total);

        Self {
            scorer,
            min_gap: settings.min_gap,
            nudge_step: settings.nudge_step,
            state: SearchState::Initial,
            best_table: initial,
            score_history: vec![best_report.total],
            best_report,
            iterations: 0,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn best_table(&self) -> &RatingTable {
        &self.best_table
    }

    pub fn best_score(&self) -> f64 {
        self.best_report.total
    }

    /// One nudged table per tier with nonzero bias
    pub fn candidates(&self) -> Vec<(Tier, RatingTable)> {
        self.best_report
            .per_tier
            .iter()
            .filter(|(_, bias)| **bias != 0.0)
            .map(|(tier, bias)| {
                let amount = self.nudge_step * bias.signum();
                (*tier, self.best_table.nudged(*tier, amount, self.min_gap))
            })
            .collect()
    }

    /// Runs one search round and returns the resulting state
    pub fn step(&mut self) -> SearchState {
        if self.state == SearchState::Converged {
            return self.state;
        }

        let mut best_candidate: Option<(Tier, RatingTable, BiasReport)> = None;
        for (tier, table) in self.candidates() {
            let report = self.scorer.score(&table);
            debug!("  candidate tier {}: total bias {:.4}", tier, report.total);

            let improves_on_round = best_candidate
                .as_ref()
                .is_none_or(|(_, _, best)| report.total < best.total);
            if improves_on_round {
                best_candidate = Some((tier, table, report));
            }
        }

        match best_candidate {
            Some((tier, table, report)) if report.total < self.best_report.total => {
                self.iterations += 1;
                info!(
                    "  → Iteration {}: nudged tier {}, total bias {:.4} → {:.4}",
                    self.iterations, tier, self.best_report.total, report.total
                );
                self.score_history.push(report.total);
                self.best_table = table;
                self.best_report = report;
                self.state = SearchState::Iterating;
            }
            _ => {
                self.state = SearchState::Converged;
            }
        }

        self.state
    }

    /// Iterates until convergence or until `max_iterations` improvements were accepted
    pub fn run(mut self, max_iterations: Option<usize>) -> CalibrationOutcome {
        let mut capped = false;

        while self.step() != SearchState::Converged {
            if max_iterations.is_some_and(|max| self.iterations >= max) {
                capped = true;
                info!("Stopping after {} iterations (cap reached)", self.iterations);
                break;
            }
        }

        if !capped {
            info!(
                "Calibration converged after {} iterations, total bias {:.4}",
                self.iterations, self.best_report.total
            );
        }

        CalibrationOutcome {
            table: self.best_table,
            report: self.best_report,
            iterations: self.iterations,
            score_history: self.score_history,
            capped,
        }
    }
}

/// Calibrates `initial` against the scorer's corpus with the given settings
pub fn calibrate(scorer: &BiasScorer, initial: RatingTable, settings: &CalibrationSettings) -> CalibrationOutcome {
    CalibrationSearch::new(scorer, initial, settings).run(settings.max_iterations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MatchRecord;
    use crate::domain::fixtures::MatchBuilder;
    use crate::reference::fixtures::{VANDAL, weapons};
    use std::collections::HashSet;

    fn settings() -> CalibrationSettings {
        CalibrationSettings {
            min_gap: 10.0,
            nudge_step: 5.0,
            reference_weapon: "Vandal".to_string(),
            max_iterations: Some(500),
        }
    }

    fn table() -> RatingTable {
        RatingTable::from_pairs([(9, 800.0), (10, 1000.0), (11, 1200.0)], 10.0).unwrap()
    }

    /// Two tier 10 players who beat two tier 11 players far more often than the table predicts
    fn lopsided_corpus() -> Vec<MatchRecord> {
        (0..3)
            .map(|i| {
                MatchBuilder::deathmatch(&format!("m{}", i))
                    .player("low-a", 10)
                    .player("low-b", 10)
                    .player("high-a", 11)
                    .player("high-b", 11)
                    .kills("low-a", "high-a", VANDAL, 4)
                    .kills("low-b", "high-b", VANDAL, 4)
                    .kills("high-a", "low-b", VANDAL, 1)
                    .kills("high-b", "low-a", VANDAL, 1)
                    .build()
            })
            .collect()
    }

    #[test]
    fn test_zero_bias_table_converges_immediately() {
        let matches: Vec<MatchRecord> = Vec::new();
        let scorer = BiasScorer::new(&matches, &weapons(), HashSet::new(), "Vandal", 1.0);

        let mut search = CalibrationSearch::new(&scorer, table(), &settings());
        assert_eq!(search.state(), SearchState::Initial);
        assert!(search.candidates().is_empty());

        assert_eq!(search.step(), SearchState::Converged);

        let outcome = CalibrationSearch::new(&scorer, table(), &settings()).run(None);
        assert_eq!(outcome.iterations, 0);
        assert_eq!(outcome.table, table());
        assert_eq!(outcome.score_history, vec![0.0]);
        assert!(!outcome.capped);
    }

    #[test]
    fn test_candidates_move_against_bias_and_keep_gaps() {
        let matches = lopsided_corpus();
        let scorer = BiasScorer::new(&matches, &weapons(), HashSet::new(), "Vandal", 1.0);

        let search = CalibrationSearch::new(&scorer, table(), &settings());
        let candidates = search.candidates();

        assert_eq!(candidates.len(), 2);
        for (tier, candidate) in &candidates {
            assert!(candidate.satisfies_min_gap(10.0));
            let moved = candidate.rating(*tier).unwrap() - table().rating(*tier).unwrap();
            let bias = search.best_report.bias(*tier);
            assert_eq!(moved.signum(), bias.signum());
        }
    }

    #[test]
    fn test_search_reduces_bias_monotonically() {
        let matches = lopsided_corpus();
        let scorer = BiasScorer::new(&matches, &weapons(), HashSet::new(), "Vandal", 1.0);

        let outcome = calibrate(&scorer, table(), &settings());

        assert!(outcome.iterations > 0);
        assert!(!outcome.capped);
        assert!(outcome.score_history.windows(2).all(|w| w[1] < w[0]));
        assert!(outcome.report.total < outcome.score_history[0]);
        assert!(outcome.table.satisfies_min_gap(10.0));
        // Tier 10 overperforms against tier 11, so the two close in until the minimum gap
        let gap = outcome.table.rating(11).unwrap() - outcome.table.rating(10).unwrap();
        assert!((gap - 10.0).abs() < 1e-9);
        assert!(outcome.table.rating(10).unwrap() > 1000.0);
    }

    #[test]
    fn test_iteration_cap_stops_early() {
        let matches = lopsided_corpus();
        let scorer = BiasScorer::new(&matches, &weapons(), HashSet::new(), "Vandal", 1.0);

        let outcome = CalibrationSearch::new(&scorer, table(), &settings()).run(Some(1));

        assert_eq!(outcome.iterations, 1);
        assert!(outcome.capped);
        assert_eq!(outcome.score_history.len(), 2);
    }
}
