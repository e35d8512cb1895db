use serde::{Deserialize, Serialize};

use crate::core::candidate::Candidate;

/// A segmented input note: the expanded full text plus the candidate
/// phrases extracted from it, in order of appearance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteDocument {
    /// Source file path (if known)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Full note text after abbreviation expansion
    pub text: String,

    /// Candidate phrases in first-appearance order
    pub candidates: Vec<Candidate>,
}

impl NoteDocument {
    #[must_use]
    pub fn new(text: impl Into<String>, candidates: Vec<Candidate>) -> Self {
        Self {
            source: None,
            text: text.into(),
            candidates,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Number of candidate phrases
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
