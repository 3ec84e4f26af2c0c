//! Regenerating the builder-owned grammar rules
//!
//! A rebuild is a straight line:
//!
//! ```text
//! remove generated rules -> pick enabled groups -> build one rule per group -> notify
//! ```
//!
//! [`generate_entries`] and [`apply_diff`] are pure, so the whole transformation
//! can be checked against plain vectors. [`rebuild`] applies it to a
//! [`GrammarHandle`]; taking the handle by `&mut` keeps two rebuilds from
//! interleaving on the same grammar.

use crate::geck::flags::FlagReader;
use crate::geck::grammar::{GrammarHandle, PatternEntry};
use crate::geck::pattern::{build_pattern, PatternError};
use crate::geck::vocabulary::VocabularyGroup;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum RebuildError {
    /// A group's tokens could not be turned into a pattern
    Pattern { scope: String, source: PatternError },
    /// Two enabled groups share a scope name
    DuplicateEntry(String),
}

impl fmt::Display for RebuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RebuildError::Pattern { scope, source } => {
                write!(f, "Cannot build pattern for '{}': {}", scope, source)
            }
            RebuildError::DuplicateEntry(scope) => {
                write!(f, "Duplicate generated entry '{}'", scope)
            }
        }
    }
}

impl std::error::Error for RebuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RebuildError::Pattern { source, .. } => Some(source),
            RebuildError::DuplicateEntry(_) => None,
        }
    }
}

/// What a rebuild changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RebuildReport {
    pub removed: usize,
    pub added: usize,
}

/// Whether a group should be highlighted under the given flags
pub fn is_group_enabled(group: &VocabularyGroup, flags: &dyn FlagReader) -> bool {
    group.gate.map_or(true, |flag| flags.is_enabled(flag))
}

/// Build one generated entry per enabled group, in catalogue order
pub fn generate_entries(
    catalogue: &[VocabularyGroup],
    flags: &dyn FlagReader,
) -> Result<Vec<PatternEntry>, RebuildError> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for group in catalogue.iter().filter(|g| is_group_enabled(g, flags)) {
        if !seen.insert(group.scope.as_str()) {
            return Err(RebuildError::DuplicateEntry(group.scope.clone()));
        }
        let source = build_pattern(&group.tokens, group.case_insensitive).map_err(|source| {
            RebuildError::Pattern {
                scope: group.scope.clone(),
                source,
            }
        })?;
        entries.push(PatternEntry::generated(group.scope.clone(), source));
    }

    Ok(entries)
}

/// Drop every generated entry from `current`, then append `generated`.
///
/// Authored entries keep their relative order.
pub fn apply_diff(current: &[PatternEntry], generated: Vec<PatternEntry>) -> Vec<PatternEntry> {
    current
        .iter()
        .filter(|entry| !entry.is_generated())
        .cloned()
        .chain(generated)
        .collect()
}

/// Regenerate all builder-owned rules of `grammar` from the current flags
pub fn rebuild<G: GrammarHandle + ?Sized>(
    grammar: &mut G,
    catalogue: &[VocabularyGroup],
    flags: &dyn FlagReader,
) -> Result<RebuildReport, RebuildError> {
    // Build first so a bad group leaves the grammar untouched
    let generated = generate_entries(catalogue, flags)?;

    let removed = grammar.patterns().iter().filter(|p| p.is_generated()).count();
    let added = generated.len();

    let next = apply_diff(grammar.patterns(), generated);
    grammar.replace_patterns(next);
    grammar.notify_changed();

    log::debug!(
        "grammar rebuilt: removed {} generated rules, added {}",
        removed,
        added
    );
    Ok(RebuildReport { removed, added })
}
