use serde::{Deserialize, Serialize};

use crate::utils::text::{normalize_for_match, tokenize};

/// A candidate problem phrase segmented out of the input note.
///
/// Candidates are ephemeral: created once per note, scored against the
/// reference table, and discarded with the report. `text` is the
/// whitespace-normalized, abbreviation-expanded segment; `offset` is
/// its byte position in the expanded note, used to keep evidence
/// findings in note order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Segment text, abbreviation-expanded and whitespace-normalized
    pub text: String,

    /// Byte offset of the segment in the expanded note text
    pub offset: usize,

    /// Ordinal position among the note's candidates (0-based)
    pub index: usize,

    // === Pre-computed for matching ===
    /// Normalized form, compared against the table's exact-match index
    #[serde(skip)]
    pub normalized: String,

    /// Normalized tokens
    #[serde(skip)]
    pub tokens: Vec<String>,
}

impl Candidate {
    #[must_use]
    pub fn new(text: impl Into<String>, offset: usize, index: usize) -> Self {
        let text = text.into();
        let normalized = normalize_for_match(&text);
        let tokens = tokenize(&text);
        Self {
            text,
            offset,
            index,
            normalized,
            tokens,
        }
    }
}
