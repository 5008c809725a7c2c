//! Retrieval Comparison Module
//!
//! Builds both ordered structures from the identical scored set, times
//! each top-K retrieval path with wall-clock elapsed time, and reports
//! per-structure results plus the faster structure. Both paths are
//! expected to agree on the top-K ordering; consumers may diff the two
//! result sets to detect divergence.

use std::cmp::Ordering;
use std::time::Instant;

use preference_scorer::{PreferenceScorer, RiskProfile, TimeHorizon};
use ranking_core::{Instrument, ScoredInstrument};
use ranking_structures::{MaxHeap, OrderedTree};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default number of results retrieved from each structure
pub const DEFAULT_TOP_K: usize = 10;

/// Timing and results for one structure's build-and-retrieve pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureReport {
    /// Wall-clock seconds for build + retrieval
    pub total_time_secs: f64,
    /// Retrieved top-K pairs, descending by score
    pub top: Vec<ScoredInstrument>,
    /// Structure size after all inserts
    pub size: usize,
}

/// Both structures' reports over the same scored set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub red_black_tree: StructureReport,
    pub max_heap: StructureReport,
    /// Size of the sector-filtered instrument set both structures were
    /// built from
    pub total_instruments: usize,
}

impl ComparisonReport {
    /// Human-readable timing summary naming the faster structure
    pub fn summary(&self) -> String {
        let tree_time = self.red_black_tree.total_time_secs;
        let heap_time = self.max_heap.total_time_secs;

        let (winner, diff) = if tree_time < heap_time {
            ("Red-Black Tree", heap_time - tree_time)
        } else {
            ("Max Heap", tree_time - heap_time)
        };

        format!(
            "\nPerformance Comparison:\nRed-Black Tree: {tree_time:.6}s\nMax Heap: {heap_time:.6}s\nWinner: {winner} ({diff:.6}s faster)\n"
        )
    }
}

/// Outcome of a comparison request.
///
/// The empty-sector case is data, not a fault: filtering by a sector with
/// no matching instruments is an expected user path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ComparisonResult {
    Compared(ComparisonReport),
    NoMatch { sector: String },
}

impl ComparisonResult {
    pub fn summary(&self) -> String {
        match self {
            ComparisonResult::Compared(report) => report.summary(),
            ComparisonResult::NoMatch { sector } => {
                format!("No instruments found for the '{sector}' sector")
            }
        }
    }
}

/// Times the heap path against the tree path over one scored set.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankingComparator;

impl RankingComparator {
    pub fn new() -> Self {
        Self
    }

    /// Filter and score `instruments` for the given preference axes, then
    /// build and time both retrieval paths independently.
    pub fn compare(
        &self,
        instruments: &[Instrument],
        risk_profile: RiskProfile,
        time_horizon: TimeHorizon,
        sector_preference: &str,
        top_k: usize,
    ) -> ComparisonResult {
        let scorer = PreferenceScorer::new(risk_profile, time_horizon, sector_preference);

        let sector_instruments = scorer.filter_by_sector(instruments);
        if sector_instruments.is_empty() {
            debug!(sector = sector_preference, "no instruments matched the sector filter");
            return ComparisonResult::NoMatch {
                sector: scorer.sector_preference().to_string(),
            };
        }

        let scored = scorer.score_all(&sector_instruments);

        let tree_report = self.run_tree_path(&scored, top_k);
        let heap_report = self.run_heap_path(&scored, top_k);

        ComparisonResult::Compared(ComparisonReport {
            red_black_tree: tree_report,
            max_heap: heap_report,
            total_instruments: sector_instruments.len(),
        })
    }

    /// Tree path: insert every pair, range-query the full score window,
    /// sort descending, truncate to `top_k`.
    pub fn run_tree_path(&self, scored: &[ScoredInstrument], top_k: usize) -> StructureReport {
        let start = Instant::now();

        let mut tree = OrderedTree::new();
        for entry in scored {
            tree.insert(entry.score, entry.instrument.clone());
        }

        let mut top = match scored.iter().map(|entry| entry.score).reduce(f64::max) {
            // window sized to the scorer's full [0, 100] output range, so
            // every element qualifies
            Some(max_score) => tree.range(max_score - 100.0, max_score),
            None => Vec::new(),
        };
        top.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        top.truncate(top_k);

        let total_time_secs = start.elapsed().as_secs_f64();
        debug!(elapsed_secs = total_time_secs, size = tree.len(), "tree path done");

        StructureReport {
            total_time_secs,
            top,
            size: tree.len(),
        }
    }

    /// Heap path: insert every pair, take `top_k` from the heap.
    pub fn run_heap_path(&self, scored: &[ScoredInstrument], top_k: usize) -> StructureReport {
        let start = Instant::now();

        let mut heap = MaxHeap::new();
        for entry in scored {
            heap.insert(entry.score, entry.instrument.clone());
        }

        let top = heap.top_k(top_k);

        let total_time_secs = start.elapsed().as_secs_f64();
        debug!(elapsed_secs = total_time_secs, size = heap.len(), "heap path done");

        StructureReport {
            total_time_secs,
            top,
            size: heap.len(),
        }
    }
}
