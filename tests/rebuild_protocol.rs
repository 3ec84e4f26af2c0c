//! Rebuild protocol against a fake host grammar
//!
//! The host keeps its own rule list and counts change notifications. Rebuilds
//! must replace exactly the generated rules and leave authored ones alone.

use language_geck::geck::flags::{FeatureFlag, FeatureFlags, FlagReader, FlagStore};
use language_geck::geck::grammar::{Grammar, GrammarHandle, PatternEntry};
use language_geck::geck::pattern::compile_pattern;
use language_geck::geck::rebuild::{rebuild, RebuildReport};
use language_geck::geck::vocabulary::{standard_catalogue, VocabularyGroup};
use std::collections::HashSet;

#[derive(Default)]
struct FakeHostGrammar {
    rules: Vec<PatternEntry>,
    notifications: usize,
}

impl GrammarHandle for FakeHostGrammar {
    fn patterns(&self) -> &[PatternEntry] {
        &self.rules
    }

    fn replace_patterns(&mut self, patterns: Vec<PatternEntry>) {
        self.rules = patterns;
    }

    fn notify_changed(&mut self) {
        self.notifications += 1;
    }
}

fn three_flag_catalogue() -> Vec<VocabularyGroup> {
    vec![
        VocabularyGroup::new("keyword.geck.foseFns", ["GetBaseObject", "GetType"])
            .gated_by(FeatureFlag::Fose),
        VocabularyGroup::new("keyword.geck.nvseFns", ["Ar_Size", "SetEventHandler"])
            .gated_by(FeatureFlag::Nvse),
        VocabularyGroup::new("keyword.geck.nxFns", ["NX_GetEVFl", "NX_SetEVFl"])
            .gated_by(FeatureFlag::Nx),
    ]
}

fn host_with_stale_entries() -> FakeHostGrammar {
    FakeHostGrammar {
        rules: vec![
            PatternEntry::authored("comment.line.semicolon.geck", ";.*$"),
            PatternEntry::generated("keyword.geck.foseFns", "stale"),
            PatternEntry::authored("string.quoted.double.geck", r#""[^"]*""#),
            PatternEntry::generated("keyword.geck.nvseFns", "stale"),
            PatternEntry::generated("keyword.geck.nxFns", "stale"),
        ],
        notifications: 0,
    }
}

fn generated_names(host: &FakeHostGrammar) -> Vec<&str> {
    host.rules
        .iter()
        .filter(|r| r.is_generated())
        .map(|r| r.name.as_str())
        .collect()
}

#[test]
fn test_disabling_one_flag_drops_one_entry() {
    let mut host = host_with_stale_entries();
    let flags = FeatureFlags::all_disabled()
        .with(FeatureFlag::Fose, true)
        .with(FeatureFlag::Nx, true);

    let report = rebuild(&mut host, &three_flag_catalogue(), &flags).unwrap();

    assert_eq!(report, RebuildReport { removed: 3, added: 2 });
    assert_eq!(host.rules.len(), 4);
    assert_eq!(host.rules.iter().filter(|r| !r.is_generated()).count(), 2);
    assert_eq!(
        generated_names(&host),
        vec!["keyword.geck.foseFns", "keyword.geck.nxFns"]
    );
    assert!(host.rules.iter().all(|r| r.match_source != "stale"));
    assert_eq!(host.notifications, 1);

    let unique: HashSet<_> = host.rules.iter().map(|r| &r.name).collect();
    assert_eq!(unique.len(), host.rules.len());
}

#[test]
fn test_authored_entries_keep_their_order() {
    let mut host = host_with_stale_entries();
    rebuild(&mut host, &three_flag_catalogue(), &FeatureFlags::default()).unwrap();

    assert_eq!(host.rules[0].name, "comment.line.semicolon.geck");
    assert_eq!(host.rules[1].name, "string.quoted.double.geck");
    assert_eq!(host.rules.len(), 5);
}

#[test]
fn test_toggle_sequence_never_accumulates() {
    let mut host = FakeHostGrammar::default();
    let catalogue = three_flag_catalogue();
    let mut flags = FeatureFlags::default();

    for flag in [
        FeatureFlag::Nvse,
        FeatureFlag::Fose,
        FeatureFlag::Nvse,
        FeatureFlag::Nx,
        FeatureFlag::Fose,
    ] {
        flags.toggle(flag);
        rebuild(&mut host, &catalogue, &flags).unwrap();

        let expected: Vec<&str> = catalogue
            .iter()
            .filter(|g| g.gate.map_or(true, |f| flags.is_enabled(f)))
            .map(|g| g.scope.as_str())
            .collect();
        assert_eq!(generated_names(&host), expected);
    }
    assert_eq!(host.notifications, 5);
}

#[test]
fn test_standard_grammar_highlights_groups() {
    let mut grammar = Grammar::new();
    let flags = FeatureFlags::default().with(FeatureFlag::Nvse, false);
    rebuild(&mut grammar, &standard_catalogue(), &flags).unwrap();

    let rule = |name: &str| {
        let entry = grammar.find(name).unwrap_or_else(|| panic!("no rule {}", name));
        compile_pattern(&entry.match_source).unwrap()
    };

    assert!(rule("keyword.control.geck.blocktype").is_match("Begin gamemode"));
    assert!(rule("keyword.geck-keyword").is_match("scn MyScript"));
    assert!(!rule("keyword.geck-keyword").is_match("SCN MyScript"));
    assert!(rule("keyword.geck.baseFns").is_match("player.GetPos x"));
    assert!(grammar.find("keyword.geck.nvseFns").is_none());
    assert!(grammar.find("keyword.geck.nxFns").is_some());
}
