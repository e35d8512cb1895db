//! Detection of acuity/status modifiers in candidate phrases.

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::types::Modifier;

lazy_static! {
    /// Priority-ordered modifier patterns; the first match wins.
    /// `AcuteOnChronic` must precede `Acute` and `Chronic`, and
    /// `Uncontrolled` must precede `Controlled`, because the longer
    /// phrases contain the shorter ones.
    static ref MODIFIER_PATTERNS: Vec<(Modifier, Regex)> = vec![
        (
            Modifier::AcuteOnChronic,
            Regex::new(r"(?i)\bacute\s+on\s+chronic\b|\bexacerbation\s+of\s+chronic\b")
                .expect("modifier pattern is valid"),
        ),
        (
            Modifier::Acute,
            Regex::new(r"(?i)\bacute\b|\bsudden\b|\bnew\s+onset\b")
                .expect("modifier pattern is valid"),
        ),
        (
            Modifier::Chronic,
            Regex::new(r"(?i)\bchronic\b|\bhx\s+of\b|\bhistory\s+of\b|\blong[-\s]standing\b|\bpersistent\b")
                .expect("modifier pattern is valid"),
        ),
        (
            Modifier::Decompensated,
            Regex::new(r"(?i)\bdecompensated\b|\bexacerbation\b|\bworsening\b|\bflare\b")
                .expect("modifier pattern is valid"),
        ),
        (
            Modifier::Uncontrolled,
            Regex::new(r"(?i)\buncontrolled\b|\bpoorly\s+controlled\b")
                .expect("modifier pattern is valid"),
        ),
        (
            Modifier::Controlled,
            Regex::new(r"(?i)\bwell[-\s]?controlled\b|\bcontrolled\b|\bat\s+goal\b")
                .expect("modifier pattern is valid"),
        ),
        (
            Modifier::Resolving,
            Regex::new(r"(?i)\bimprov(?:ing|ed)\b|\bresolv(?:ing|ed)\b")
                .expect("modifier pattern is valid"),
        ),
        (
            Modifier::Stable,
            Regex::new(r"(?i)\bstable\b|\bat\s+baseline\b|\bcompensated\b")
                .expect("modifier pattern is valid"),
        ),
    ];
}

/// Return the highest-priority modifier present in `text`, or
/// `Unspecified` when nothing matches.
#[must_use]
pub fn detect_modifier(text: &str) -> Modifier {
    for (modifier, re) in MODIFIER_PATTERNS.iter() {
        if re.is_match(text) {
            return *modifier;
        }
    }
    Modifier::Unspecified
}
