//! Main module for GECK language support

pub mod extension;
pub mod flags;
pub mod grammar;
pub mod host;
pub mod lookup;
pub mod pattern;
pub mod rebuild;
pub mod vocabulary;
