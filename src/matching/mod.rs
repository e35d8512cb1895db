//! Fuzzy matching engine and scoring algorithms.
//!
//! This module provides the core matching functionality:
//!
//! - [`MatchingEngine`]: scores note candidates against the code table
//! - [`MatchScore`]: detailed similarity scores for one comparison
//! - [`MatchResult`]: one candidate's outcome, matched or not
//!
//! ## Matching Algorithm
//!
//! 1. **Exact description match**: normalized candidate text looked up
//!    in the table's description index, skipping the scan
//! 2. **Scored scan**: every entry scored in table order; the best
//!    score wins, ties keep the first entry encountered
//! 3. **Threshold**: a best score below the configured minimum leaves
//!    the candidate unmatched rather than coded with low confidence
//!
//! ## Scoring
//!
//! The composite score weighs three components:
//!
//! - **Token coverage**: how well candidate tokens account for each
//!   description token (dominant, tolerant of extra narrative words)
//! - **Token Jaccard**: exact token-set overlap
//! - **Edit ratio**: indel similarity of the sorted-token strings
//!
//! ## Example
//!
//! ```rust
//! use cmsify::core::entry::CodeEntry;
//! use cmsify::matching::engine::MatchingEngine;
//! use cmsify::parsing::note::segment_note;
//! use cmsify::table::store::CodeTable;
//!
//! let mut table = CodeTable::new();
//! table.add_entry(CodeEntry::new("N17.9", "Acute kidney failure, unspecified"));
//!
//! let note = segment_note("Mild AKI likely prerenal.");
//! let engine = MatchingEngine::new(&table);
//! let results = engine.match_note(&note);
//!
//! assert_eq!(results[0].entry.as_ref().unwrap().code.0, "N17.9");
//! ```

pub mod engine;
pub mod scoring;

pub use engine::{MatchResult, MatchingConfig, MatchingEngine, ScoringWeights};
pub use scoring::MatchScore;
