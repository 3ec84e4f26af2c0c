//! Token set patterns
//!
//! Builds a single regex alternation out of a list of literal tokens, for use as
//! the `match` field of one tokenizer rule.
//!
//! ## Design
//!
//! The alternation is leftmost-first, so a short token listed before a longer one
//! that starts with it would win and stop the match early. Tokens are therefore
//! ordered longest first before they are joined:
//!
//! ```text
//! Tokens:   ["Set", "SetEventHandler"]
//! Pattern:  "(?:\bSetEventHandler\b|\bSet\b)"
//! ```
//!
//! Word boundaries go on each token, and only on a side that is a word
//! character. `\b` needs a word character on one side, so a token such as
//! `==` or `x+` wrapped in a boundary would never match on its own:
//!
//! ```text
//! Tokens:   ["x+", "==", "Set"]
//! Pattern:  "(?:\bSet\b|\bx\+|==)"
//! ```
//!
//! Every token is escaped, so `end-if` or `Ar_*` match literally. Case-insensitive
//! sets carry an inline `(?i)` flag, because a rule's `match` field has no other
//! place to put it.
//!
//! This module has no knowledge of GECK. It works on any token list.

use regex::Regex;
use std::fmt;

/// Source of a pattern that can never match, not even the empty string.
///
/// `\b` and `\B` cannot both hold at the same position.
pub const NEVER_MATCH: &str = r"\b\B";

/// Inline flag prepended to case-insensitive sets.
pub const CASE_INSENSITIVE_FLAG: &str = "(?i)";

/// Error type for pattern construction
#[derive(Debug, Clone, PartialEq)]
pub enum PatternError {
    /// A token cannot be turned into a literal match
    InvalidToken {
        index: usize,
        token: String,
        reason: &'static str,
    },
    /// The pattern source was rejected by the regex engine
    InvalidPattern(String),
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::InvalidToken {
                index,
                token,
                reason,
            } => write!(f, "Invalid token #{} ({:?}): {}", index, token, reason),
            PatternError::InvalidPattern(msg) => write!(f, "Invalid regex pattern: {}", msg),
        }
    }
}

impl std::error::Error for PatternError {}

/// Build the regex source matching any of `tokens` as a whole token.
///
/// Tokens are matched literally, longest first (ties keep their input order).
/// A token edge that is a word character must sit on a word boundary; a
/// punctuation edge needs none. An empty list yields [`NEVER_MATCH`] so the
/// rule can be installed safely.
///
/// # Example
/// ```ignore
/// let source = build_pattern(&["Set", "SetEventHandler"], false)?;
/// assert_eq!(source, r"(?:\bSetEventHandler\b|\bSet\b)");
/// ```
pub fn build_pattern<S: AsRef<str>>(
    tokens: &[S],
    case_insensitive: bool,
) -> Result<String, PatternError> {
    for (index, token) in tokens.iter().enumerate() {
        validate_token(index, token.as_ref())?;
    }

    if tokens.is_empty() {
        return Ok(NEVER_MATCH.to_string());
    }

    let alternation = longest_first(tokens)
        .into_iter()
        .map(bounded_literal)
        .collect::<Vec<_>>()
        .join("|");

    let flag = if case_insensitive {
        CASE_INSENSITIVE_FLAG
    } else {
        ""
    };
    Ok(format!("{}(?:{})", flag, alternation))
}

/// Escape `token` and add `\b` on each edge that is a word character.
fn bounded_literal(token: &str) -> String {
    let leading = token.chars().next().is_some_and(is_word_char);
    let trailing = token.chars().next_back().is_some_and(is_word_char);

    let mut out = String::with_capacity(token.len() + 4);
    if leading {
        out.push_str(r"\b");
    }
    out.push_str(&regex::escape(token));
    if trailing {
        out.push_str(r"\b");
    }
    out
}

// Approximates the regex engine's Unicode `\w`
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Order tokens by descending length in chars. The sort is stable.
pub fn longest_first<S: AsRef<str>>(tokens: &[S]) -> Vec<&str> {
    let mut ordered: Vec<&str> = tokens.iter().map(|t| t.as_ref()).collect();
    ordered.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    ordered
}

/// Compile a pattern source produced by [`build_pattern`]
pub fn compile_pattern(source: &str) -> Result<Regex, PatternError> {
    Regex::new(source).map_err(|e| PatternError::InvalidPattern(e.to_string()))
}

fn validate_token(index: usize, token: &str) -> Result<(), PatternError> {
    let reason = if token.trim().is_empty() {
        Some("token is empty")
    } else if token.contains('\0') {
        Some("token contains a NUL character")
    } else if token.chars().any(char::is_control) {
        Some("token contains a control character")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(PatternError::InvalidToken {
            index,
            token: token.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn compiled(tokens: &[&str], case_insensitive: bool) -> Regex {
        let source = build_pattern(tokens, case_insensitive).unwrap();
        compile_pattern(&source).unwrap()
    }

    #[test]
    fn test_longer_token_ordered_first() {
        let source = build_pattern(&["Set", "SetEventHandler"], false).unwrap();
        insta::assert_snapshot!(source, @r"(?:\bSetEventHandler\b|\bSet\b)");
    }

    #[test]
    fn test_ties_keep_input_order() {
        let source = build_pattern(&["Let", "If", "Set", "Eval"], false).unwrap();
        insta::assert_snapshot!(source, @r"(?:\bEval\b|\bLet\b|\bSet\b|\bIf\b)");
    }

    #[test]
    fn test_case_insensitive_flag_prefix() {
        let source = build_pattern(&["GameMode"], true).unwrap();
        insta::assert_snapshot!(source, @r"(?i)(?:\bGameMode\b)");
    }

    #[test]
    fn test_symbol_edges_get_no_boundary() {
        let source = build_pattern(&["==", "Set", "x+", "-foo", "end-if"], false).unwrap();
        insta::assert_snapshot!(source, @r"(?:\bend\-if\b|\-foo\b|\bSet\b|==|\bx\+)");
    }

    #[rstest]
    #[case("==")]
    #[case("&&")]
    #[case("||")]
    #[case("-foo")]
    #[case("x+")]
    #[case("Set")]
    fn test_symbol_tokens_match_alone(#[case] token: &str) {
        let re = compiled(&["==", "&&", "||", "-foo", "x+", "Set"], false);
        assert_eq!(re.find(token).map(|m| m.as_str()), Some(token));
        assert_eq!(
            re.find(&format!("if a {} b", token)).map(|m| m.as_str()),
            Some(token)
        );
    }

    #[test]
    fn test_word_edge_of_symbol_token_keeps_boundary() {
        let re = compiled(&["x+", "-foo"], false);
        assert!(!re.is_match("ax+"));
        assert!(!re.is_match("-food"));
        assert!(re.is_match("y = x+1"));
    }

    #[test]
    fn test_prefix_token_does_not_shadow_longer_token() {
        let re = compiled(&["Set", "SetEventHandler"], false);
        let m = re.find("SetEventHandler").unwrap();
        assert_eq!(m.as_str(), "SetEventHandler");
    }

    #[test]
    fn test_case_sensitivity() {
        assert!(!compiled(&["Foo"], false).is_match("foo"));
        assert!(compiled(&["Foo"], true).is_match("foo"));
        assert!(compiled(&["Foo"], true).is_match("FOO"));
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let re = compiled(&["end-if"], false);
        assert_eq!(re.find("end-if").unwrap().as_str(), "end-if");
        assert!(!re.is_match("endxif"));
        assert!(!re.is_match("endeif"));

        let re = compiled(&["a.b", "x+"], false);
        assert!(re.is_match("a.b"));
        assert!(re.is_match("x+"));
        assert_eq!(re.find("x+").unwrap().as_str(), "x+");
        assert!(!re.is_match("axb"));
        assert!(!re.is_match("xx"));
    }

    #[test]
    fn test_whole_word_only() {
        let re = compiled(&["Set"], false);
        assert!(re.is_match("Set x to 5"));
        assert!(!re.is_match("Reset"));
        assert!(!re.is_match("Settle"));
    }

    #[test]
    fn test_empty_list_never_matches() {
        let source = build_pattern::<&str>(&[], false).unwrap();
        assert_eq!(source, NEVER_MATCH);

        let re = compile_pattern(&source).unwrap();
        for input in ["", " ", "a", "Set", "end-if", "\n"] {
            assert!(!re.is_match(input), "matched {:?}", input);
        }
    }

    #[test]
    fn test_invalid_tokens_rejected() {
        let err = build_pattern(&["ok", "bad\0token"], false).unwrap_err();
        match err {
            PatternError::InvalidToken { index, .. } => assert_eq!(index, 1),
            other => panic!("Expected InvalidToken, got {:?}", other),
        }

        assert!(build_pattern(&[""], false).is_err());
        assert!(build_pattern(&["  "], false).is_err());
        assert!(build_pattern(&["tab\tbed"], false).is_err());
    }

    #[test]
    fn test_build_is_deterministic() {
        let tokens = ["GetPos", "SetPos", "Get", "GetPosEx"];
        assert_eq!(
            build_pattern(&tokens, true).unwrap(),
            build_pattern(&tokens, true).unwrap()
        );
    }

    #[test]
    fn test_longest_first_counts_chars() {
        assert_eq!(longest_first(&["ab", "é", "abc"]), vec!["abc", "ab", "é"]);
    }

    #[test]
    fn test_invalid_pattern_error() {
        let err = compile_pattern("(unclosed").unwrap_err();
        assert!(matches!(err, PatternError::InvalidPattern(_)));
    }
}
