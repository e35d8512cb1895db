use serde::{Deserialize, Serialize};

use crate::core::candidate::Candidate;
use crate::core::entry::CodeEntry;
use crate::core::note::NoteDocument;
use crate::matching::scoring::MatchScore;
use crate::table::store::CodeTable;

/// Result of matching one candidate against the table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// The candidate phrase
    pub candidate: Candidate,

    /// Best entry at or above the threshold; `None` when the candidate
    /// is unmatched
    pub entry: Option<CodeEntry>,

    /// Score of the best entry scanned, even when it was rejected by
    /// the threshold
    pub score: MatchScore,
}

impl MatchResult {
    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.entry.is_some()
    }
}

/// A scored table entry, for ranked listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredEntry {
    pub entry: CodeEntry,
    pub score: MatchScore,
}

/// Default minimum composite score for accepting a match
pub const DEFAULT_MIN_SCORE: f64 = 0.5;

/// Configuration for the matching engine
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    /// Candidates whose best score falls below this are unmatched
    pub min_score: f64,
    /// Custom scoring weights
    pub scoring_weights: ScoringWeights,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            scoring_weights: ScoringWeights::default(),
        }
    }
}

/// Configurable weights for the scoring components
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight for description-token coverage
    pub token_coverage: f64,
    /// Weight for token-set Jaccard similarity
    pub token_jaccard: f64,
    /// Weight for the sorted-token edit ratio
    pub edit_ratio: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            token_coverage: 0.6,  // 60%
            token_jaccard: 0.25,  // 25%
            edit_ratio: 0.15,     // 15%
        }
    }
}

impl ScoringWeights {
    /// Normalize weights to sum to 1.0
    #[must_use]
    pub fn normalized(&self) -> Self {
        let total = self.token_coverage + self.token_jaccard + self.edit_ratio;
        if total <= 0.0 {
            return Self::default();
        }
        Self {
            token_coverage: self.token_coverage / total,
            token_jaccard: self.token_jaccard / total,
            edit_ratio: self.edit_ratio / total,
        }
    }
}

/// The matching engine: scores candidates against an immutable code
/// table passed in by reference.
pub struct MatchingEngine<'a> {
    table: &'a CodeTable,
    config: MatchingConfig,
}

impl<'a> MatchingEngine<'a> {
    /// Create a new matching engine with default configuration
    pub fn new(table: &'a CodeTable) -> Self {
        Self {
            table,
            config: MatchingConfig::default(),
        }
    }

    /// Create a new matching engine with custom configuration
    pub fn with_config(table: &'a CodeTable, config: MatchingConfig) -> Self {
        Self { table, config }
    }

    /// Match every candidate of a note, preserving note order.
    ///
    /// Results are never reordered by score; the report follows
    /// first-appearance order.
    pub fn match_note(&self, note: &NoteDocument) -> Vec<MatchResult> {
        note.candidates
            .iter()
            .map(|c| self.match_candidate(c))
            .collect()
    }

    /// Match a single candidate against the full table.
    ///
    /// Tries the exact description index first, then scans entries in
    /// table order keeping the best score. Ties keep the first entry
    /// encountered, so matching is deterministic for a fixed table.
    pub fn match_candidate(&self, candidate: &Candidate) -> MatchResult {
        // Exact description match skips the scan entirely
        if let Some(entry) = self.table.find_by_description(&candidate.normalized) {
            let score =
                MatchScore::calculate_with_weights(candidate, entry, &self.config.scoring_weights);
            return MatchResult {
                candidate: candidate.clone(),
                entry: Some(entry.clone()),
                score,
            };
        }

        let mut best: Option<(&CodeEntry, MatchScore)> = None;
        for entry in self.table.entries() {
            let score =
                MatchScore::calculate_with_weights(candidate, entry, &self.config.scoring_weights);
            match &best {
                Some((_, b)) if score.composite <= b.composite => {}
                _ => best = Some((entry, score)),
            }
        }

        match best {
            Some((entry, score)) if score.composite >= self.config.min_score => MatchResult {
                candidate: candidate.clone(),
                entry: Some(entry.clone()),
                score,
            },
            Some((_, score)) => MatchResult {
                candidate: candidate.clone(),
                entry: None,
                score,
            },
            None => MatchResult {
                candidate: candidate.clone(),
                entry: None,
                score: MatchScore::none(),
            },
        }
    }

    /// Rank all table entries against one candidate, best first.
    ///
    /// Used by the `score` subcommand for diagnostics; the report
    /// pipeline never reorders by score.
    pub fn top_matches(&self, candidate: &Candidate, limit: usize) -> Vec<ScoredEntry> {
        let mut scored: Vec<ScoredEntry> = self
            .table
            .entries()
            .iter()
            .map(|entry| ScoredEntry {
                entry: entry.clone(),
                score: MatchScore::calculate_with_weights(
                    candidate,
                    entry,
                    &self.config.scoring_weights,
                ),
            })
            .collect();

        // Stable sort keeps table order for equal scores
        scored.sort_by(|a, b| {
            b.score
                .composite
                .partial_cmp(&a.score.composite)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(limit);
        scored
    }
}
