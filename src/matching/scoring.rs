use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::candidate::Candidate;
use crate::core::entry::CodeEntry;
use crate::core::types::Confidence;
use crate::matching::engine::ScoringWeights;

/// Safely convert usize to f64 for ratio calculations
///
/// Token and character counts in clinical phrases are far inside the
/// f64 mantissa range, so the precision loss is theoretical only.
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Detailed similarity scores between a candidate phrase and a
/// reference description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    /// Mean over description tokens of the best indel similarity
    /// against any candidate token. Tolerant of extra narrative tokens
    /// in the candidate ("on metformin", "likely prerenal").
    pub token_coverage: f64,

    /// Jaccard similarity of the exact token sets
    pub token_jaccard: f64,

    /// Indel similarity of the sorted-token strings
    pub edit_ratio: f64,

    /// Weighted composite score in [0, 1]
    pub composite: f64,

    /// Confidence level derived from the composite
    pub confidence: Confidence,
}

impl MatchScore {
    /// Calculate the similarity between a candidate and a reference
    /// entry using the default weights.
    #[must_use]
    pub fn calculate(candidate: &Candidate, entry: &CodeEntry) -> Self {
        Self::calculate_with_weights(candidate, entry, &ScoringWeights::default())
    }

    /// Calculate the similarity with custom scoring weights.
    ///
    /// Pure function of its inputs: no table state, no side effects.
    #[must_use]
    pub fn calculate_with_weights(
        candidate: &Candidate,
        entry: &CodeEntry,
        weights: &ScoringWeights,
    ) -> Self {
        let token_coverage = token_coverage(&entry.tokens, &candidate.tokens);
        let token_jaccard = token_jaccard(&candidate.tokens, &entry.tokens);
        let edit_ratio = indel_similarity(
            &sorted_token_string(&candidate.tokens),
            &sorted_token_string(&entry.tokens),
        );

        let normalized = weights.normalized();
        let composite = normalized.token_coverage * token_coverage
            + normalized.token_jaccard * token_jaccard
            + normalized.edit_ratio * edit_ratio;

        let confidence = Confidence::from_score(composite);

        Self {
            token_coverage,
            token_jaccard,
            edit_ratio,
            composite,
            confidence,
        }
    }

    /// Score for a candidate that was compared against nothing
    /// (empty table).
    #[must_use]
    pub fn none() -> Self {
        Self {
            token_coverage: 0.0,
            token_jaccard: 0.0,
            edit_ratio: 0.0,
            composite: 0.0,
            confidence: Confidence::Low,
        }
    }
}

/// Jaccard similarity of two token sets: |A ∩ B| / |A ∪ B|
///
/// Returns 0.0 when both sets are empty, to avoid treating two
/// contentless phrases as identical.
fn token_jaccard(a: &[String], b: &[String]) -> f64 {
    let a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let b: HashSet<&str> = b.iter().map(String::as_str).collect();
    let union = a.union(&b).count();
    if union == 0 {
        0.0
    } else {
        count_to_f64(a.intersection(&b).count()) / count_to_f64(union)
    }
}

/// How well the candidate's tokens cover the description's tokens.
///
/// For each description token, takes the best indel similarity against
/// any candidate token and averages the results. Extra candidate
/// tokens never lower the score; missing description tokens do.
fn token_coverage(description_tokens: &[String], candidate_tokens: &[String]) -> f64 {
    if description_tokens.is_empty() || candidate_tokens.is_empty() {
        return 0.0;
    }

    let total: f64 = description_tokens
        .iter()
        .map(|dt| {
            candidate_tokens
                .iter()
                .map(|ct| indel_similarity(dt, ct))
                .fold(0.0, f64::max)
        })
        .sum();

    total / count_to_f64(description_tokens.len())
}

/// Normalized indel similarity of two strings: `2 * LCS / (|a| + |b|)`.
///
/// 1.0 for identical strings, 0.0 when nothing is shared. Equivalent
/// to one minus the normalized insert/delete edit distance.
pub fn indel_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let lcs = lcs_length(&a, &b);
    2.0 * count_to_f64(lcs) / count_to_f64(a.len() + b.len())
}

/// Length of the longest common subsequence, two-row DP.
fn lcs_length(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

fn sorted_token_string(tokens: &[String]) -> String {
    let mut sorted: Vec<&str> = tokens.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indel_similarity() {
        assert!((indel_similarity("abc", "abc") - 1.0).abs() < 1e-9);
        // LCS("abc", "abd") = "ab" -> 2*2/6
        assert!((indel_similarity("abc", "abd") - 2.0 / 3.0).abs() < 1e-9);
        assert!((indel_similarity("", "abc") - 0.0).abs() < 1e-9);
        assert!((indel_similarity("", "") - 1.0).abs() < 1e-9);
        assert!((indel_similarity("xyz", "abc") - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_lcs_length() {
        let a: Vec<char> = "kidney".chars().collect();
        let b: Vec<char> = "kidneys".chars().collect();
        assert_eq!(lcs_length(&a, &b), 6);

        let a: Vec<char> = "acute".chars().collect();
        let b: Vec<char> = "failure".chars().collect();
        // "aue"
        assert_eq!(lcs_length(&a, &b), 3);
    }

    #[test]
    fn test_token_jaccard() {
        let a = vec!["acute".to_string(), "kidney".to_string(), "injury".to_string()];
        let b = vec!["acute".to_string(), "kidney".to_string(), "failure".to_string()];
        // intersection 2, union 4
        assert!((token_jaccard(&a, &b) - 0.5).abs() < 1e-9);
        assert!((token_jaccard(&[], &[]) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_token_coverage_ignores_extra_candidate_tokens() {
        let description = vec!["pneumonia".to_string()];
        let candidate = vec![
            "pneumonia".to_string(),
            "on".to_string(),
            "ceftriaxone".to_string(),
        ];
        assert!((token_coverage(&description, &candidate) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_identity_scores_one() {
        let entry = CodeEntry::new("N17.9", "Acute kidney failure, unspecified");
        let candidate = Candidate::new("Acute kidney failure, unspecified", 0, 0);
        let score = MatchScore::calculate(&candidate, &entry);
        assert!(score.composite > 0.999);
        assert_eq!(score.confidence, Confidence::Exact);
    }

    #[test]
    fn test_unrelated_phrases_score_low() {
        let entry = CodeEntry::new("E11.9", "Type 2 diabetes mellitus without complication");
        let candidate = Candidate::new("sugars okay", 0, 0);
        let score = MatchScore::calculate(&candidate, &entry);
        assert!(score.composite < 0.4);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let entry = CodeEntry::new("N17.9", "Acute kidney failure, unspecified");
        let candidate = Candidate::new("Mild Acute kidney injury likely prerenal", 0, 0);
        let first = MatchScore::calculate(&candidate, &entry);
        let second = MatchScore::calculate(&candidate, &entry);
        assert_eq!(first, second);
    }
}
