//! Evidence annotation for matched problems.
//!
//! After matching, every result is annotated with:
//!
//! - **Evidence**: objective findings (labs, vitals, treatment
//!   markers) supporting the problem, or a "no supporting data"
//!   warning when none are present
//! - **Modifier**: the highest-priority acuity/status qualifier
//!   detected in the candidate phrase
//!
//! ## Evidence rule
//!
//! Findings are collected from the candidate's own segment and from
//! every segment that was not itself matched to a code (unmatched
//! segments are narrative context, and that is where notes keep their
//! objective data). Findings are deduplicated, kept in note order,
//! and capped at [`MAX_FINDINGS`]. The warning flag is informational
//! only; the match itself stands.

use serde::{Deserialize, Serialize};

use crate::core::candidate::Candidate;
use crate::core::types::Modifier;
use crate::matching::engine::MatchResult;

pub mod evidence;
pub mod modifier;

pub use evidence::{extract_findings, merge_findings, Finding};
pub use modifier::detect_modifier;

/// Maximum number of findings carried in one evidence string
pub const MAX_FINDINGS: usize = 3;

/// Supporting evidence for one problem, or the warning that none was
/// found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Evidence {
    /// Comma-joined findings, in note order
    Supported(String),
    /// No objective finding present; rendered as a warning marker
    NoSupportingData,
}

impl std::fmt::Display for Evidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Supported(s) => write!(f, "{s}"),
            Self::NoSupportingData => write!(f, "no supporting data"),
        }
    }
}

/// Annotation attached to one match result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub modifier: Modifier,
    pub evidence: Evidence,
}

impl Annotation {
    /// Analyze a candidate against its context segments.
    ///
    /// `context` holds the note's unmatched candidates (excluding this
    /// one); their findings count as support alongside the candidate's
    /// own.
    #[must_use]
    pub fn analyze(candidate: &Candidate, context: &[&Candidate]) -> Self {
        let mut findings = extract_findings(&candidate.text, candidate.offset);
        for c in context {
            findings.extend(extract_findings(&c.text, c.offset));
        }
        let findings = merge_findings(findings, MAX_FINDINGS);

        let evidence = if findings.is_empty() {
            Evidence::NoSupportingData
        } else {
            let joined = findings
                .iter()
                .map(|f| f.text.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            Evidence::Supported(joined)
        };

        Self {
            modifier: detect_modifier(&candidate.text),
            evidence,
        }
    }
}

/// A fully annotated problem, ready for the report formatter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub result: MatchResult,
    pub annotation: Annotation,
}

/// Annotate every match result of a note, preserving order.
///
/// Unmatched results are annotated too, so machine-readable output can
/// carry their modifier and evidence alongside the "no code" outcome.
#[must_use]
pub fn annotate_results(results: Vec<MatchResult>) -> Vec<Problem> {
    let context: Vec<Candidate> = results
        .iter()
        .filter(|r| !r.is_matched())
        .map(|r| r.candidate.clone())
        .collect();

    results
        .into_iter()
        .map(|result| {
            let ctx: Vec<&Candidate> = context
                .iter()
                .filter(|c| c.index != result.candidate.index)
                .collect();
            let annotation = Annotation::analyze(&result.candidate, &ctx);
            Problem { result, annotation }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::CodeEntry;
    use crate::matching::engine::MatchingEngine;
    use crate::parsing::note::segment_note;
    use crate::table::store::CodeTable;

    fn make_test_table() -> CodeTable {
        let mut table = CodeTable::new();
        table.add_entry(CodeEntry::new(
            "E11.9",
            "Type 2 diabetes mellitus without complication",
        ));
        table.add_entry(CodeEntry::new("N17.9", "Acute kidney failure, unspecified"));
        table
    }

    #[test]
    fn test_evidence_from_candidate_and_unmatched_context() {
        let table = make_test_table();
        let engine = MatchingEngine::new(&table);

        let note = segment_note("DM2 on metformin, sugars okay.");
        let problems = annotate_results(engine.match_note(&note));

        assert_eq!(problems.len(), 2);
        assert!(problems[0].result.is_matched());
        assert_eq!(
            problems[0].annotation.evidence,
            Evidence::Supported("on metformin, glucose stable".to_string())
        );
    }

    #[test]
    fn test_warning_when_no_objective_findings() {
        let table = make_test_table();
        let engine = MatchingEngine::new(&table);

        let note = segment_note("Mild AKI likely prerenal.");
        let problems = annotate_results(engine.match_note(&note));

        assert_eq!(problems.len(), 1);
        assert!(problems[0].result.is_matched());
        assert_eq!(problems[0].annotation.evidence, Evidence::NoSupportingData);
        assert_eq!(problems[0].annotation.modifier, Modifier::Acute);
    }

    #[test]
    fn test_matched_segments_do_not_feed_other_problems() {
        let table = make_test_table();
        let engine = MatchingEngine::new(&table);

        // Both segments match, so neither is context for the other:
        // the kidney problem keeps its own (absent) findings.
        let note = segment_note("DM2 on metformin. Mild AKI likely prerenal.");
        let problems = annotate_results(engine.match_note(&note));

        assert_eq!(problems.len(), 2);
        assert_eq!(
            problems[0].annotation.evidence,
            Evidence::Supported("on metformin".to_string())
        );
        assert_eq!(problems[1].annotation.evidence, Evidence::NoSupportingData);
    }

    #[test]
    fn test_annotation_order_follows_note_order() {
        let table = make_test_table();
        let engine = MatchingEngine::new(&table);

        let note = segment_note("Mild AKI likely prerenal; DM2 on metformin.");
        let problems = annotate_results(engine.match_note(&note));

        let codes: Vec<String> = problems
            .iter()
            .filter_map(|p| p.result.entry.as_ref().map(|e| e.code.0.clone()))
            .collect();
        assert_eq!(codes, vec!["N17.9", "E11.9"]);
    }
}
