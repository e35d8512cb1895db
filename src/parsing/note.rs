use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::core::candidate::Candidate;
use crate::core::note::NoteDocument;
use crate::parsing::abbrev::expand_abbreviations;
use crate::utils::text::normalize_whitespace;

#[derive(Error, Debug)]
pub enum NoteError {
    #[error("failed to read note input: {0}")]
    Io(#[from] std::io::Error),
}

/// Characters that end a candidate phrase. Purely punctuation based,
/// no semantic understanding.
const SEGMENT_DELIMITERS: [char; 4] = ['.', ';', ',', '\n'];

/// Read the note text from a file, or from standard input when the
/// path is absent or `-`.
///
/// # Errors
///
/// Returns `NoteError::Io` if the file or stream cannot be read.
pub fn read_note(path: Option<&Path>) -> Result<String, NoteError> {
    match path {
        Some(p) if p.to_string_lossy() != "-" => Ok(std::fs::read_to_string(p)?),
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Split a raw note into candidate phrases.
///
/// Abbreviations are expanded first, then the text is split on
/// sentence and clause delimiters in a single pass. Each segment is
/// whitespace-normalized; empty segments are discarded. Candidate
/// order follows first appearance in the note.
#[must_use]
pub fn segment_note(raw: &str) -> NoteDocument {
    let expanded = expand_abbreviations(raw);

    let mut candidates = Vec::new();
    let mut start = 0;
    for (pos, ch) in expanded.char_indices() {
        if SEGMENT_DELIMITERS.contains(&ch) {
            push_segment(&expanded, start, pos, &mut candidates);
            start = pos + ch.len_utf8();
        }
    }
    push_segment(&expanded, start, expanded.len(), &mut candidates);

    debug!(
        segments = candidates.len(),
        "segmented note into candidate phrases"
    );

    NoteDocument::new(expanded, candidates)
}

fn push_segment(expanded: &str, start: usize, end: usize, candidates: &mut Vec<Candidate>) {
    let text = normalize_whitespace(&expanded[start..end]);
    if !text.is_empty() {
        let index = candidates.len();
        candidates.push(Candidate::new(text, start, index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_on_clause_boundaries() {
        let note = segment_note("DM2 on metformin, sugars okay.");
        assert_eq!(note.len(), 2);
        assert_eq!(note.candidates[0].text, "Type 2 diabetes mellitus on metformin");
        assert_eq!(note.candidates[1].text, "sugars okay");
    }

    #[test]
    fn test_discards_empty_segments() {
        let note = segment_note("Pneumonia.;\n\n , Anemia.");
        assert_eq!(note.len(), 2);
        assert_eq!(note.candidates[0].text, "Pneumonia");
        assert_eq!(note.candidates[1].text, "Anemia");
    }

    #[test]
    fn test_candidate_order_follows_note_order() {
        let note = segment_note("first; second; third");
        let texts: Vec<&str> = note.candidates.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert!(note.candidates[0].offset < note.candidates[1].offset);
        assert!(note.candidates[1].offset < note.candidates[2].offset);
    }

    #[test]
    fn test_whitespace_only_note_yields_no_candidates() {
        assert!(segment_note("   \n\n ").is_empty());
        assert!(segment_note("").is_empty());
    }

    #[test]
    fn test_whitespace_normalized_candidates() {
        let note = segment_note("Congestive\theart   failure exacerbation");
        assert_eq!(note.candidates[0].text, "Congestive heart failure exacerbation");
    }
}
