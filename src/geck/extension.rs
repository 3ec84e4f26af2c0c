//! Editor commands
//!
//! [`GeckExtension`] owns the flag store, the grammar handle and the browser
//! launcher, and dispatches the commands an editor binds to keys and menus.

use crate::geck::flags::{FeatureFlag, FlagStore};
use crate::geck::grammar::GrammarHandle;
use crate::geck::host::{BrowserLauncher, CommandRegistry, LaunchError, SelectionSource};
use crate::geck::lookup::{word_regex, DocSite, DocTarget};
use crate::geck::rebuild::{rebuild, RebuildError, RebuildReport};
use crate::geck::vocabulary::{standard_catalogue, VocabularyGroup};
use std::fmt;
use url::Url;

pub const COMMAND_LOOKUP: &str = "language-geck:lookup";
pub const COMMAND_TOGGLE_VEGAS: &str = "language-geck:toggleVegas";
pub const COMMAND_TOGGLE_FOSE: &str = "language-geck:toggleFOSE";
pub const COMMAND_TOGGLE_NVSE: &str = "language-geck:toggleNVSE";
pub const COMMAND_TOGGLE_NX: &str = "language-geck:toggleNX";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Lookup,
    Toggle(FeatureFlag),
}

impl Command {
    pub fn all() -> &'static [Command] {
        &[
            Command::Lookup,
            Command::Toggle(FeatureFlag::Fose),
            Command::Toggle(FeatureFlag::Vegas),
            Command::Toggle(FeatureFlag::Nvse),
            Command::Toggle(FeatureFlag::Nx),
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::Lookup => COMMAND_LOOKUP,
            Command::Toggle(FeatureFlag::Vegas) => COMMAND_TOGGLE_VEGAS,
            Command::Toggle(FeatureFlag::Fose) => COMMAND_TOGGLE_FOSE,
            Command::Toggle(FeatureFlag::Nvse) => COMMAND_TOGGLE_NVSE,
            Command::Toggle(FeatureFlag::Nx) => COMMAND_TOGGLE_NX,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExtensionError {
    UnknownCommand(String),
    Rebuild(RebuildError),
}

impl fmt::Display for ExtensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionError::UnknownCommand(name) => write!(f, "Unknown command '{}'", name),
            ExtensionError::Rebuild(err) => write!(f, "Grammar update failed: {}", err),
        }
    }
}

impl std::error::Error for ExtensionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtensionError::UnknownCommand(_) => None,
            ExtensionError::Rebuild(err) => Some(err),
        }
    }
}

impl From<RebuildError> for ExtensionError {
    fn from(err: RebuildError) -> Self {
        ExtensionError::Rebuild(err)
    }
}

/// Result of looking up one selection
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Opened { target: DocTarget, url: Url },
    /// The page could not be opened; reported, not fatal. `reason` tells a
    /// missing launcher apart from one that failed.
    NotOpened { url: Url, reason: LaunchError },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Lookup(Vec<LookupOutcome>),
    Toggled {
        flag: FeatureFlag,
        enabled: bool,
        report: RebuildReport,
    },
}

pub struct GeckExtension<F, G, B> {
    flags: F,
    grammar: G,
    browser: B,
    docs: DocSite,
    catalogue: Vec<VocabularyGroup>,
}

impl<F, G, B> GeckExtension<F, G, B>
where
    F: FlagStore,
    G: GrammarHandle,
    B: BrowserLauncher,
{
    pub fn new(flags: F, grammar: G, browser: B, docs: DocSite) -> Self {
        Self::with_catalogue(flags, grammar, browser, docs, standard_catalogue())
    }

    pub fn with_catalogue(
        flags: F,
        grammar: G,
        browser: B,
        docs: DocSite,
        catalogue: Vec<VocabularyGroup>,
    ) -> Self {
        Self {
            flags,
            grammar,
            browser,
            docs,
            catalogue,
        }
    }

    pub fn flags(&self) -> &F {
        &self.flags
    }

    pub fn grammar(&self) -> &G {
        &self.grammar
    }

    /// Register every command, then bring the grammar in line with the flags
    pub fn activate(
        &mut self,
        registry: &mut dyn CommandRegistry,
    ) -> Result<RebuildReport, ExtensionError> {
        for command in Command::all() {
            registry.register(command.name());
        }
        self.update_grammar()
    }

    /// Run a command by its registered name
    pub fn execute(
        &mut self,
        name: &str,
        selections: &dyn SelectionSource,
    ) -> Result<CommandOutcome, ExtensionError> {
        match Command::from_name(name) {
            Some(Command::Lookup) => Ok(CommandOutcome::Lookup(self.lookup(selections))),
            Some(Command::Toggle(flag)) => self.toggle(flag),
            None => Err(ExtensionError::UnknownCommand(name.to_string())),
        }
    }

    /// Open the documentation page for each selection
    pub fn lookup(&self, selections: &dyn SelectionSource) -> Vec<LookupOutcome> {
        selections
            .selections()
            .iter()
            .map(|selection| {
                let target = DocTarget::from_candidate(selection.candidate(word_regex()));
                match &target {
                    DocTarget::Function(name) => log::info!("looking up function {}", name),
                    DocTarget::Index => log::info!("opening functions index"),
                }
                self.open(target)
            })
            .collect()
    }

    pub fn toggle(&mut self, flag: FeatureFlag) -> Result<CommandOutcome, ExtensionError> {
        let enabled = self.flags.toggle(flag);
        log::info!("{} highlighting {}", flag, if enabled { "on" } else { "off" });
        let report = self.update_grammar()?;
        Ok(CommandOutcome::Toggled {
            flag,
            enabled,
            report,
        })
    }

    pub fn update_grammar(&mut self) -> Result<RebuildReport, ExtensionError> {
        Ok(rebuild(&mut self.grammar, &self.catalogue, &self.flags)?)
    }

    fn open(&self, target: DocTarget) -> LookupOutcome {
        let url = self.docs.url_for(&target);
        match self.browser.open(&url) {
            Ok(()) => LookupOutcome::Opened { target, url },
            Err(reason) => {
                log::error!("cannot open {}: {}", url, reason);
                LookupOutcome::NotOpened { url, reason }
            }
        }
    }
}
