//! # language-geck
//!
//! Syntax highlighting patterns and documentation lookup for GECK scripts.
//!
//! The crate models an editor extension without depending on any editor. The
//! host's command registry, configuration store, grammar and selections are
//! reached through the traits in [`geck::host`], [`geck::flags`] and
//! [`geck::grammar`], so everything here is testable with plain values.
//!
//! ## Layout
//!
//! - [`geck::pattern`]: turns a token list into one regex alternation.
//! - [`geck::vocabulary`]: the GECK token groups.
//! - [`geck::rebuild`]: regenerates builder-owned grammar rules from flags.
//! - [`geck::lookup`]: finds the function under the cursor and its doc page.
//! - [`geck::extension`]: the commands an editor binds to.

pub mod geck;
