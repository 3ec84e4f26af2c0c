//! Feature flags gating the optional vocabulary groups
//!
//! The flags themselves live in the host's configuration store. Code that needs
//! them takes a [`FlagReader`] (or a [`FlagStore`] when it also writes), so tests
//! can pass a fixed [`FeatureFlags`] instead of global state.

use geck_config::HighlightConfig;
use std::fmt;

/// Optional vocabulary groups that can be switched on and off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureFlag {
    Vegas,
    Fose,
    Nvse,
    Nx,
}

impl FeatureFlag {
    /// All flags, in display order
    pub fn all() -> &'static [FeatureFlag] {
        &[
            FeatureFlag::Vegas,
            FeatureFlag::Fose,
            FeatureFlag::Nvse,
            FeatureFlag::Nx,
        ]
    }

    /// Short lowercase name, also the key under `[highlight]` in config files
    pub fn name(self) -> &'static str {
        match self {
            FeatureFlag::Vegas => "vegas",
            FeatureFlag::Fose => "fose",
            FeatureFlag::Nvse => "nvse",
            FeatureFlag::Nx => "nx",
        }
    }

    /// Setting name as the editor package exposes it
    pub fn setting_key(self) -> &'static str {
        match self {
            FeatureFlag::Vegas => "highlightVegas",
            FeatureFlag::Fose => "highlightFOSE",
            FeatureFlag::Nvse => "highlightNVSE",
            FeatureFlag::Nx => "highlightNX",
        }
    }

    /// Dotted key for configuration overrides
    pub fn config_key(self) -> String {
        format!("highlight.{}", self.name())
    }

    /// Parse a short name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|flag| flag.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for FeatureFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read access to the current flag values
pub trait FlagReader {
    fn is_enabled(&self, flag: FeatureFlag) -> bool;
}

/// Read/write access to the flag values
pub trait FlagStore: FlagReader {
    fn set(&mut self, flag: FeatureFlag, enabled: bool);

    /// Flip a flag and return its new value
    fn toggle(&mut self, flag: FeatureFlag) -> bool {
        let enabled = !self.is_enabled(flag);
        self.set(flag, enabled);
        enabled
    }
}

/// In-memory flag store. Every flag starts enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureFlags {
    pub vegas: bool,
    pub fose: bool,
    pub nvse: bool,
    pub nx: bool,
}

impl FeatureFlags {
    pub fn all_enabled() -> Self {
        Self {
            vegas: true,
            fose: true,
            nvse: true,
            nx: true,
        }
    }

    pub fn all_disabled() -> Self {
        Self {
            vegas: false,
            fose: false,
            nvse: false,
            nx: false,
        }
    }

    /// Builder-style setter
    pub fn with(mut self, flag: FeatureFlag, enabled: bool) -> Self {
        self.set(flag, enabled);
        self
    }

    fn slot(&mut self, flag: FeatureFlag) -> &mut bool {
        match flag {
            FeatureFlag::Vegas => &mut self.vegas,
            FeatureFlag::Fose => &mut self.fose,
            FeatureFlag::Nvse => &mut self.nvse,
            FeatureFlag::Nx => &mut self.nx,
        }
    }
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self::all_enabled()
    }
}

impl From<HighlightConfig> for FeatureFlags {
    fn from(config: HighlightConfig) -> Self {
        Self {
            vegas: config.vegas,
            fose: config.fose,
            nvse: config.nvse,
            nx: config.nx,
        }
    }
}

impl FlagReader for FeatureFlags {
    fn is_enabled(&self, flag: FeatureFlag) -> bool {
        match flag {
            FeatureFlag::Vegas => self.vegas,
            FeatureFlag::Fose => self.fose,
            FeatureFlag::Nvse => self.nvse,
            FeatureFlag::Nx => self.nx,
        }
    }
}

impl FlagStore for FeatureFlags {
    fn set(&mut self, flag: FeatureFlag, enabled: bool) {
        *self.slot(flag) = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_everything() {
        let flags = FeatureFlags::default();
        for flag in FeatureFlag::all() {
            assert!(flags.is_enabled(*flag));
        }
    }

    #[test]
    fn test_toggle_returns_new_value() {
        let mut flags = FeatureFlags::default();
        assert!(!flags.toggle(FeatureFlag::Nvse));
        assert!(!flags.nvse);
        assert!(flags.toggle(FeatureFlag::Nvse));
        assert!(flags.nvse);
        assert!(flags.vegas && flags.fose && flags.nx);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(FeatureFlag::from_name("vegas"), Some(FeatureFlag::Vegas));
        assert_eq!(FeatureFlag::from_name("NVSE"), Some(FeatureFlag::Nvse));
        assert_eq!(FeatureFlag::from_name("obse"), None);
    }

    #[test]
    fn test_keys() {
        assert_eq!(FeatureFlag::Fose.setting_key(), "highlightFOSE");
        assert_eq!(FeatureFlag::Nx.config_key(), "highlight.nx");
    }

    #[test]
    fn test_from_highlight_config() {
        let config = HighlightConfig {
            vegas: true,
            fose: false,
            nvse: true,
            nx: false,
        };
        let flags = FeatureFlags::from(config);
        assert!(flags.is_enabled(FeatureFlag::Vegas));
        assert!(!flags.is_enabled(FeatureFlag::Fose));
        assert!(!flags.is_enabled(FeatureFlag::Nx));
    }
}
