//! # cmsify
//!
//! A library for converting free-text clinical progress notes into a
//! structured, CMS-ready ICD-10 problem list.
//!
//! Clinical notes mention conditions in shorthand and free phrasing:
//! "DM2 on metformin", "Mild AKI likely prerenal". Billing and
//! compliance want the same facts as coded problems with supporting
//! documentation. `cmsify` bridges the two with local, deterministic
//! string matching: no network calls, no learned models.
//!
//! ## Pipeline
//!
//! The conversion is strictly linear:
//!
//! 1. **Load**: read the reference code table from a delimited file
//! 2. **Segment**: expand abbreviations and split the note into
//!    candidate phrases on clause boundaries
//! 3. **Match**: fuzzy-score each candidate against every description,
//!    accept the best entry above the threshold
//! 4. **Annotate**: attach objective findings (labs, vitals,
//!    treatments) or a "no supporting data" warning
//! 5. **Format**: render the numbered problem list in note order
//!
//! ## Example
//!
//! ```rust
//! use cmsify::{annotate_results, CodeEntry, CodeTable, MatchingEngine};
//! use cmsify::parsing::note::segment_note;
//!
//! let mut table = CodeTable::new();
//! table.add_entry(CodeEntry::new(
//!     "E11.9",
//!     "Type 2 diabetes mellitus without complication",
//! ));
//!
//! let note = segment_note("DM2 on metformin, sugars okay.");
//! let engine = MatchingEngine::new(&table);
//! let problems = annotate_results(engine.match_note(&note));
//!
//! let first = &problems[0];
//! assert_eq!(first.result.entry.as_ref().unwrap().code.0, "E11.9");
//! ```
//!
//! ## Modules
//!
//! - [`table`]: code table loading and lookup
//! - [`core`]: core data types for entries, candidates, and notes
//! - [`parsing`]: abbreviation expansion and note segmentation
//! - [`matching`]: fuzzy matching engine and scoring
//! - [`annotate`]: evidence extraction and modifier detection
//! - [`cli`]: command-line interface implementation

pub mod annotate;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod table;
pub mod utils;

// Re-export commonly used types for convenience
pub use annotate::{annotate_results, Annotation, Evidence, Problem};
pub use core::candidate::Candidate;
pub use core::entry::CodeEntry;
pub use core::note::NoteDocument;
pub use core::types::*;
pub use matching::engine::{MatchResult, MatchingConfig, MatchingEngine, ScoringWeights};
pub use matching::scoring::MatchScore;
pub use table::store::CodeTable;
