//! Extraction of objective supporting findings from note text.
//!
//! A finding is one lab value, vital sign, or treatment marker that
//! substantiates a documented problem. Detection is fixed
//! regular-expression pattern families; a few colloquial status
//! phrases are rewritten to a canonical form ("sugars okay" becomes
//! "glucose stable").

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One extracted finding with its absolute position in the note,
/// used to keep evidence in note order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub text: String,
    pub position: usize,
}

lazy_static! {
    /// Pattern families paired with an optional canonical rewrite.
    static ref FINDING_PATTERNS: Vec<(Regex, Option<&'static str>)> = vec![
        // Lab values: Cr 2.1, BUN 38, WBC 16.3, K 3.2, glucose 340
        (
            Regex::new(
                r"(?i)\b(?:Cr|BUN|WBC|Hgb|Hct|K|Na|glucose|lactate|INR|BNP)\s*[:=]?\s*\d+(?:\.\d+)?"
            )
            .expect("lab pattern is valid"),
            None,
        ),
        // Blood pressure: BP 98/62
        (
            Regex::new(r"(?i)\bBP\s*[:=]?\s*\d{2,3}/\d{2,3}").expect("bp pattern is valid"),
            None,
        ),
        // Heart and respiratory rates
        (
            Regex::new(r"(?i)\b(?:HR|RR|pulse)\s*[:=]?\s*\d+").expect("rate pattern is valid"),
            None,
        ),
        // Oxygenation: SpO2 92%, O2 sat 88
        (
            Regex::new(r"(?i)\b(?:SpO2|O2\s+sat(?:uration)?)\s*[:=]?\s*\d+\s*%?")
                .expect("oxygen pattern is valid"),
            None,
        ),
        // Temperature: T 38.2C, temp 101.4
        (
            Regex::new(r"(?i)\b(?:T|temp(?:erature)?)\s*[:=]?\s*\d+(?:\.\d+)?\s*[CF]?\b")
                .expect("temperature pattern is valid"),
            None,
        ),
        // Treatment markers: on metformin, on lasix, on ceftriaxone
        (
            Regex::new(r"(?i)\bon\s+[A-Za-z][A-Za-z-]{2,}").expect("treatment pattern is valid"),
            None,
        ),
        // Colloquial glycemic status, rewritten to canonical phrasing
        (
            Regex::new(r"(?i)\bsugars?\s+(?:okay|ok|stable|controlled|at\s+goal)\b")
                .expect("glycemic pattern is valid"),
            Some("glucose stable"),
        ),
    ];
}

/// Extract findings from a text fragment. `base_offset` is the
/// fragment's position in the note, so positions from different
/// fragments stay comparable.
#[must_use]
pub fn extract_findings(text: &str, base_offset: usize) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (re, rewrite) in FINDING_PATTERNS.iter() {
        for m in re.find_iter(text) {
            let text = rewrite.map_or_else(|| m.as_str().to_string(), str::to_string);
            findings.push(Finding {
                text,
                position: base_offset + m.start(),
            });
        }
    }
    findings.sort_by_key(|f| f.position);
    findings
}

/// Merge findings from several fragments: note order, duplicates
/// dropped case-insensitively, capped at `limit`.
#[must_use]
pub fn merge_findings(mut findings: Vec<Finding>, limit: usize) -> Vec<Finding> {
    findings.sort_by_key(|f| f.position);
    let mut seen: HashSet<String> = HashSet::new();
    findings.retain(|f| seen.insert(f.text.to_lowercase()));
    findings.truncate(limit);
    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_lab_values() {
        let findings = extract_findings("Cr 2.1 from baseline, BUN 38", 0);
        let texts: Vec<&str> = findings.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["Cr 2.1", "BUN 38"]);
    }

    #[test]
    fn test_extracts_treatment_markers() {
        let findings = extract_findings("Type 2 diabetes mellitus on metformin", 0);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].text, "on metformin");
    }

    #[test]
    fn test_rewrites_glycemic_status() {
        let findings = extract_findings("sugars okay", 0);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].text, "glucose stable");
    }

    #[test]
    fn test_no_findings_in_bare_diagnosis() {
        assert!(extract_findings("Mild Acute kidney injury likely prerenal", 0).is_empty());
    }

    #[test]
    fn test_positions_are_offset() {
        let findings = extract_findings("on lasix", 40);
        assert_eq!(findings[0].position, 40);
    }

    #[test]
    fn test_merge_orders_dedups_and_caps() {
        let a = extract_findings("WBC 16.3, on ceftriaxone", 0);
        let b = extract_findings("WBC 16.3, lactate 3.2, HR 110", 30);
        let merged = merge_findings([a, b].concat(), 3);
        let texts: Vec<&str> = merged.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["WBC 16.3", "on ceftriaxone", "lactate 3.2"]);
    }
}
