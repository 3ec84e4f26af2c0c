//! Documentation lookup
//!
//! Finds the function name a user is pointing at and maps it to its page on the
//! GECK wiki. Selections come from the host as plain text plus the cursor line,
//! so nothing here touches editor objects.
//!
//! An empty or multi-word selection is not an error. It falls back to the
//! functions index page.

use geck_config::DocsConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// What counts as one GECK identifier when looking under the cursor
pub const WORD_PATTERN: &str = r"[\w\-]+";

static WORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(WORD_PATTERN).expect("word pattern is a valid regex"));

pub fn word_regex() -> &'static Regex {
    &WORD_REGEX
}

/// Pull a lookup candidate out of selected text.
///
/// Returns `None` for empty text or text spanning more than one word.
pub fn extract_candidate(text: &str, word_pattern: &Regex) -> Option<String> {
    if text.is_empty() || text.chars().any(char::is_whitespace) {
        return None;
    }
    word_pattern.find(text).map(|m| m.as_str().to_string())
}

/// The word touching `column` (a char index) in `line`, if any.
///
/// A cursor sitting right after the last character of a word still counts.
pub fn word_at<'a>(line: &'a str, column: usize, word_pattern: &Regex) -> Option<&'a str> {
    let offset = line
        .char_indices()
        .nth(column)
        .map(|(i, _)| i)
        .unwrap_or(line.len());

    word_pattern
        .find_iter(line)
        .find(|m| m.start() <= offset && offset <= m.end())
        .map(|m| m.as_str())
}

/// One selection (or bare cursor) in the active document
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    /// Selected text; empty when only a cursor is placed
    pub text: String,
    /// Full text of the line holding the cursor
    pub line: String,
    /// Cursor column on `line`, in chars
    pub column: usize,
}

impl Selection {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn cursor(line: impl Into<String>, column: usize) -> Self {
        Self {
            text: String::new(),
            line: line.into(),
            column,
        }
    }

    /// The selected word, or the word under the cursor for an empty selection
    pub fn candidate(&self, word_pattern: &Regex) -> Option<String> {
        if self.text.is_empty() {
            word_at(&self.line, self.column, word_pattern).map(str::to_string)
        } else {
            extract_candidate(&self.text, word_pattern)
        }
    }
}

/// Page a lookup resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocTarget {
    Function(String),
    Index,
}

impl DocTarget {
    pub fn from_candidate(candidate: Option<String>) -> Self {
        match candidate {
            Some(name) => DocTarget::Function(name),
            None => DocTarget::Index,
        }
    }
}

/// Documentation wiki layout: `<base_url>?<title_param>=<page>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocSite {
    base_url: Url,
    title_param: String,
    functions_page: String,
}

impl DocSite {
    pub fn new(
        base_url: &str,
        title_param: impl Into<String>,
        functions_page: impl Into<String>,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            title_param: title_param.into(),
            functions_page: functions_page.into(),
        })
    }

    pub fn from_config(config: &DocsConfig) -> Result<Self, url::ParseError> {
        Self::new(
            &config.base_url,
            config.title_param.clone(),
            config.functions_page.clone(),
        )
    }

    pub fn url_for(&self, target: &DocTarget) -> Url {
        let page = match target {
            DocTarget::Function(name) => name.as_str(),
            DocTarget::Index => self.functions_page.as_str(),
        };
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair(&self.title_param, page);
        url
    }
}
