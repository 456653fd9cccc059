//! Tone adjustment — rewrites informal phrasing for `formal` and `academic` requests.
//!
//! A fixed, ordered table of case-sensitive replacements. A pattern only matches
//! when surrounded by single spaces, so tokens at the very start or end of the
//! text, or touching punctuation, are left alone.

use serde::{Deserialize, Serialize};

/// Requested register for the corrected text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Tone {
    #[default]
    Neutral,
    Formal,
    Academic,
}

impl From<String> for Tone {
    /// Unknown values fall back to `Neutral`.
    fn from(value: String) -> Self {
        match value.as_str() {
            "formal" => Tone::Formal,
            "academic" => Tone::Academic,
            _ => Tone::Neutral,
        }
    }
}

impl Tone {
    pub fn wants_formal_rewrite(self) -> bool {
        matches!(self, Tone::Formal | Tone::Academic)
    }
}

/// Evaluated top to bottom; order is significant.
pub const FORMAL_REPLACEMENTS: &[(&str, &str)] = &[
    ("can't", "cannot"),
    ("don't", "do not"),
    ("won't", "will not"),
    ("I'm", "I am"),
    ("it's", "it is"),
    ("gonna", "going to"),
    ("wanna", "want to"),
    ("kids", "children"),
    ("guys", "individuals"),
];

/// Applies `FORMAL_REPLACEMENTS` to `text`, space-delimited on both sides.
pub fn apply_formal_tone(text: &str) -> String {
    FORMAL_REPLACEMENTS
        .iter()
        .fold(text.to_string(), |acc, (informal, formal)| {
            acc.replace(&format!(" {informal} "), &format!(" {formal} "))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_space_delimited_contraction() {
        assert_eq!(apply_formal_tone(" I'm here "), " I am here ");
    }

    #[test]
    fn test_start_of_text_is_not_replaced() {
        assert_eq!(apply_formal_tone("I'm here"), "I'm here");
        assert_eq!(apply_formal_tone("I'm"), "I'm");
    }

    #[test]
    fn test_already_formal_text_is_unchanged() {
        assert_eq!(apply_formal_tone("I am tired"), "I am tired");
    }

    #[test]
    fn test_punctuation_blocks_replacement() {
        assert_eq!(
            apply_formal_tone("Well, the kids, they can't."),
            "Well, the kids, they can't."
        );
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(apply_formal_tone("so Gonna go"), "so Gonna go");
        assert_eq!(apply_formal_tone("so gonna go"), "so going to go");
    }

    #[test]
    fn test_full_sentence() {
        assert_eq!(
            apply_formal_tone("Hey guys I think it's gonna rain so the kids don't go out."),
            "Hey individuals I think it is going to rain so the children do not go out."
        );
    }

    #[test]
    fn test_adjacent_matches_share_a_space() {
        // The first match consumes the shared space, so the second is not matched.
        assert_eq!(apply_formal_tone("a don't don't b"), "a do not don't b");
    }

    #[test]
    fn test_tone_parsing_falls_back_to_neutral() {
        assert_eq!(Tone::from("formal".to_string()), Tone::Formal);
        assert_eq!(Tone::from("academic".to_string()), Tone::Academic);
        assert_eq!(Tone::from("casual".to_string()), Tone::Neutral);
        let parsed: Tone = serde_json::from_str(r#""FORMAL""#).unwrap();
        assert_eq!(parsed, Tone::Neutral);
    }

    #[test]
    fn test_only_formal_and_academic_rewrite() {
        assert!(Tone::Formal.wants_formal_rewrite());
        assert!(Tone::Academic.wants_formal_rewrite());
        assert!(!Tone::Neutral.wants_formal_rewrite());
    }
}
