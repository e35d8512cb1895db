use serde::{Deserialize, Serialize};

use crate::core::types::CodeId;
use crate::utils::text::{normalize_for_match, tokenize};

/// A single (code, description) row from the reference table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeEntry {
    /// Diagnosis code (e.g., "N17.9")
    pub code: CodeId,

    /// Full reference description used for matching
    pub description: String,

    /// Shorter display description, when the source file carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    // === Pre-computed for matching (populated on load) ===
    /// Normalized description, key of the table's exact-match index
    #[serde(skip)]
    pub normalized: String,

    /// Normalized description tokens
    #[serde(skip)]
    pub tokens: Vec<String>,
}

impl CodeEntry {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        let mut entry = Self {
            code: CodeId::new(code),
            description: description.into(),
            short_description: None,
            normalized: String::new(),
            tokens: Vec::new(),
        };
        entry.rebuild_index();
        entry
    }

    #[must_use]
    pub fn with_short_description(mut self, short: impl Into<String>) -> Self {
        self.short_description = Some(short.into());
        self
    }

    /// Rebuild the pre-computed normalized forms after deserialization
    /// or after modifying the description.
    pub fn rebuild_index(&mut self) {
        self.normalized = normalize_for_match(&self.description);
        self.tokens = tokenize(&self.description);
    }

    /// The description preferred for display: the short form when
    /// present, the full description otherwise.
    #[must_use]
    pub fn display_description(&self) -> &str {
        self.short_description.as_deref().unwrap_or(&self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_precomputes_normalized_forms() {
        let entry = CodeEntry::new("N17.9", "Acute kidney failure, unspecified");
        assert_eq!(entry.normalized, "acute kidney failure unspecified");
        assert_eq!(entry.tokens.len(), 4);
    }

    #[test]
    fn test_display_description_prefers_short_form() {
        let entry = CodeEntry::new("E11.9", "Type 2 diabetes mellitus without complication")
            .with_short_description("Type 2 diabetes w/o complication");
        assert_eq!(entry.display_description(), "Type 2 diabetes w/o complication");

        let bare = CodeEntry::new("I10", "Essential (primary) hypertension");
        assert_eq!(bare.display_description(), "Essential (primary) hypertension");
    }
}
