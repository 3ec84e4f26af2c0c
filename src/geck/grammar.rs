//! Grammar rule list
//!
//! A grammar is an ordered list of [`PatternEntry`] rules. Some are authored by
//! hand ([`Origin::Static`]), the rest are produced from the vocabulary groups
//! ([`Origin::Generated`]) and replaced wholesale on every rebuild.
//!
//! The host's tokenizer is reached through [`GrammarHandle`]. [`Grammar`] is the
//! crate's own implementation and serializes to a TextMate-style JSON document.

use serde::Serialize;

pub const SCOPE_NAME: &str = "source.geck";

/// Where a rule came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Static,
    Generated,
}

impl Origin {
    pub fn is_static(&self) -> bool {
        matches!(self, Origin::Static)
    }
}

/// One named tokenizer rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternEntry {
    pub name: String,
    #[serde(rename = "match")]
    pub match_source: String,
    #[serde(skip_serializing_if = "Origin::is_static")]
    pub origin: Origin,
}

impl PatternEntry {
    pub fn authored(name: impl Into<String>, match_source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            match_source: match_source.into(),
            origin: Origin::Static,
        }
    }

    pub fn generated(name: impl Into<String>, match_source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            match_source: match_source.into(),
            origin: Origin::Generated,
        }
    }

    pub fn is_generated(&self) -> bool {
        self.origin == Origin::Generated
    }
}

/// Access to the host's mutable rule list
pub trait GrammarHandle {
    fn patterns(&self) -> &[PatternEntry];

    fn replace_patterns(&mut self, patterns: Vec<PatternEntry>);

    /// Tell the host its rules changed so open documents get re-tokenized
    fn notify_changed(&mut self);
}

/// The GECK grammar
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grammar {
    pub scope_name: String,
    pub name: String,
    pub file_types: Vec<String>,
    pub patterns: Vec<PatternEntry>,
    /// Bumped by every [`GrammarHandle::notify_changed`]
    #[serde(skip)]
    pub revision: u64,
}

impl Grammar {
    /// A grammar holding only the authored rules
    pub fn new() -> Self {
        Self::with_patterns(authored_patterns())
    }

    pub fn with_patterns(patterns: Vec<PatternEntry>) -> Self {
        Self {
            scope_name: SCOPE_NAME.to_string(),
            name: "GECK".to_string(),
            file_types: vec!["geck".to_string(), "gek".to_string()],
            patterns,
            revision: 0,
        }
    }

    pub fn generated(&self) -> impl Iterator<Item = &PatternEntry> {
        self.patterns.iter().filter(|p| p.is_generated())
    }

    pub fn find(&self, name: &str) -> Option<&PatternEntry> {
        self.patterns.iter().find(|p| p.name == name)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}

impl GrammarHandle for Grammar {
    fn patterns(&self) -> &[PatternEntry] {
        &self.patterns
    }

    fn replace_patterns(&mut self, patterns: Vec<PatternEntry>) {
        self.patterns = patterns;
    }

    fn notify_changed(&mut self) {
        self.revision += 1;
    }
}

/// Hand-written rules every GECK grammar starts with
pub fn authored_patterns() -> Vec<PatternEntry> {
    vec![
        PatternEntry::authored("comment.line.semicolon.geck", r";.*$"),
        PatternEntry::authored("string.quoted.double.geck", r#""(?:[^"\\]|\\.)*""#),
        PatternEntry::authored("constant.numeric.geck", r"\b\d+(?:\.\d+)?\b"),
        PatternEntry::authored(
            "keyword.operator.geck",
            r"==|!=|<=|>=|&&|\|\||[-+*/<>=!]",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geck::pattern::compile_pattern;

    #[test]
    fn test_new_grammar_has_only_authored_rules() {
        let grammar = Grammar::new();
        assert_eq!(grammar.scope_name, "source.geck");
        assert!(!grammar.patterns.is_empty());
        assert_eq!(grammar.generated().count(), 0);
    }

    #[test]
    fn test_authored_rules_compile() {
        for entry in authored_patterns() {
            compile_pattern(&entry.match_source)
                .unwrap_or_else(|e| panic!("{}: {}", entry.name, e));
        }
    }

    #[test]
    fn test_comment_rule_matches_to_end_of_line() {
        let comment = compile_pattern(&authored_patterns()[0].match_source).unwrap();
        let m = comment.find("set x to 1 ; counter").unwrap();
        assert_eq!(m.as_str(), "; counter");
    }

    #[test]
    fn test_notify_bumps_revision() {
        let mut grammar = Grammar::new();
        grammar.notify_changed();
        grammar.notify_changed();
        assert_eq!(grammar.revision, 2);
    }

    #[test]
    fn test_json_shape() {
        let grammar = Grammar::with_patterns(vec![
            PatternEntry::authored("comment.line.semicolon.geck", ";.*$"),
            PatternEntry::generated("keyword.geck-keyword", r"\b(?:set)\b"),
        ]);
        let value: serde_json::Value = serde_json::from_str(&grammar.to_json().unwrap()).unwrap();

        assert_eq!(value["scopeName"], "source.geck");
        assert_eq!(value["fileTypes"][0], "geck");
        assert!(value.get("revision").is_none());

        let patterns = value["patterns"].as_array().unwrap();
        assert_eq!(patterns[0]["match"], ";.*$");
        assert!(patterns[0].get("origin").is_none());
        assert_eq!(patterns[1]["name"], "keyword.geck-keyword");
        assert_eq!(patterns[1]["origin"], "generated");
    }
}
