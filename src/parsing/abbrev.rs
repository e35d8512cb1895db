//! Expansion of common clinical abbreviations.
//!
//! Reference descriptions never contain shorthand like "DM2" or "AKI",
//! so abbreviations are rewritten to their full diagnosis names before
//! segmentation. Replacement is word-boundary anchored and
//! case-sensitive: "AKI" expands, "akinetic" does not.

use lazy_static::lazy_static;
use regex::Regex;

/// Abbreviation -> full diagnosis name, applied in order.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("DM2", "Type 2 diabetes mellitus"),
    ("DM1", "Type 1 diabetes mellitus"),
    ("HTN", "Hypertension"),
    ("AKI", "Acute kidney injury"),
    ("CKD", "Chronic kidney disease"),
    ("CHF", "Congestive heart failure"),
    ("COPD", "Chronic obstructive pulmonary disease"),
    ("OSA", "Obstructive sleep apnea"),
    ("CAD", "Coronary artery disease"),
    ("AFib", "Atrial fibrillation"),
];

lazy_static! {
    static ref ABBREV_PATTERNS: Vec<(Regex, &'static str)> = ABBREVIATIONS
        .iter()
        .map(|(abbr, full)| {
            let pattern = format!(r"\b{}\b", regex::escape(abbr));
            (Regex::new(&pattern).expect("abbreviation pattern is valid"), *full)
        })
        .collect();
}

/// Rewrite every known abbreviation in `text` to its full name.
#[must_use]
pub fn expand_abbreviations(text: &str) -> String {
    let mut expanded = text.to_string();
    for (re, full) in ABBREV_PATTERNS.iter() {
        expanded = re.replace_all(&expanded, *full).into_owned();
    }
    expanded
}
