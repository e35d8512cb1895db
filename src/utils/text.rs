//! Centralized text normalization helpers.
//!
//! All matching in this crate happens over normalized text: lowercase,
//! alphanumeric tokens, single spaces. The raw candidate text is kept
//! separately for display and evidence extraction.

/// Collapse runs of whitespace into single spaces and trim the ends.
///
/// # Examples
///
/// ```
/// use cmsify::utils::text::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("  DM2   on    metformin "), "DM2 on metformin");
/// ```
#[must_use]
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a phrase for matching: lowercase, strip punctuation,
/// collapse whitespace.
///
/// Two phrases that normalize to the same string are considered an
/// exact match by the table's description index.
#[must_use]
pub fn normalize_for_match(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_was_space = true;
    for ch in s.chars() {
        if ch.is_alphanumeric() {
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
            last_was_space = false;
        } else if !last_was_space {
            out.push(' ');
            last_was_space = true;
        }
    }
    if out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Split a phrase into normalized tokens.
///
/// # Examples
///
/// ```
/// use cmsify::utils::text::tokenize;
///
/// let tokens = tokenize("Acute kidney failure, unspecified");
/// assert_eq!(tokens, vec!["acute", "kidney", "failure", "unspecified"]);
/// ```
#[must_use]
pub fn tokenize(s: &str) -> Vec<String> {
    normalize_for_match(s)
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("a  b\tc\n d"), "a b c d");
        assert_eq!(normalize_whitespace("   "), "");
        assert_eq!(normalize_whitespace("single"), "single");
    }

    #[test]
    fn test_normalize_for_match() {
        assert_eq!(
            normalize_for_match("Acute kidney failure, unspecified"),
            "acute kidney failure unspecified"
        );
        assert_eq!(
            normalize_for_match("Essential (primary) hypertension"),
            "essential primary hypertension"
        );
        assert_eq!(normalize_for_match("Type 2 DM"), "type 2 dm");
        assert_eq!(normalize_for_match(""), "");
        assert_eq!(normalize_for_match("..."), "");
    }

    #[test]
    fn test_tokenize_drops_punctuation() {
        assert_eq!(tokenize("sugars okay."), vec!["sugars", "okay"]);
        assert!(tokenize(";;;").is_empty());
    }
}
