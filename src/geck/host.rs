//! Host editor capabilities
//!
//! The pieces of the editor this crate talks to, reduced to what it needs. The
//! flag store and grammar handle live next to their data in
//! [`crate::geck::flags`] and [`crate::geck::grammar`].

use crate::geck::lookup::Selection;
use std::fmt;
use std::process::{Child, Command, Stdio};
use std::thread;
use url::Url;

/// Where named commands get bound
pub trait CommandRegistry {
    fn register(&mut self, name: &str);
}

impl CommandRegistry for Vec<String> {
    fn register(&mut self, name: &str) {
        self.push(name.to_string());
    }
}

/// Selections of the active document
pub trait SelectionSource {
    fn selections(&self) -> Vec<Selection>;
}

impl SelectionSource for Vec<Selection> {
    fn selections(&self) -> Vec<Selection> {
        self.clone()
    }
}

/// Error type for opening external resources
#[derive(Debug, Clone, PartialEq)]
pub enum LaunchError {
    /// No way to open a browser on this system
    Unavailable(String),
    /// A launcher exists but failed
    Failed(String),
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchError::Unavailable(msg) => write!(f, "Browser unavailable: {}", msg),
            LaunchError::Failed(msg) => write!(f, "Failed to open browser: {}", msg),
        }
    }
}

impl std::error::Error for LaunchError {}

/// Opens URLs for the user
pub trait BrowserLauncher {
    fn open(&self, url: &Url) -> Result<(), LaunchError>;
}

/// Programs tried, in order, to open a URL
pub const LAUNCHERS: &[&str] = &["xdg-open", "open", "wslview"];

/// Opens URLs with the first launcher program found on `PATH`
///
/// The launcher is waited on from a background thread, so `open` returns
/// as soon as it has started and the child never lingers as a zombie. A
/// launcher that exits unsuccessfully is logged, not reported.
#[derive(Debug, Clone, Default)]
pub struct SystemBrowser;

impl SystemBrowser {
    pub fn new() -> Self {
        Self
    }
}

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &Url) -> Result<(), LaunchError> {
        let program = LAUNCHERS
            .iter()
            .find_map(|name| which::which(name).ok())
            .ok_or_else(|| {
                LaunchError::Unavailable(format!("none of {} found", LAUNCHERS.join(", ")))
            })?;

        log::debug!("opening {} with {}", url, program.display());
        let child = Command::new(&program)
            .arg(url.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| LaunchError::Failed(format!("{}: {}", program.display(), e)))?;

        reap(child, program.display().to_string());
        Ok(())
    }
}

fn reap(mut child: Child, program: String) {
    thread::spawn(move || match child.wait() {
        Ok(status) if status.success() => {}
        Ok(status) => log::warn!("{} exited with {}", program, status),
        Err(e) => log::warn!("cannot wait for {}: {}", program, e),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_is_a_selection_source() {
        let source = vec![Selection::text("GetPos"), Selection::cursor("Kill", 0)];
        assert_eq!(source.selections().len(), 2);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_reaped_child_is_waited_on() {
        let child = Command::new("true").spawn().unwrap();
        let pid = child.id();
        reap(child, "true".to_string());

        let proc_entry = std::path::PathBuf::from(format!("/proc/{}", pid));
        for _ in 0..200 {
            if !proc_entry.exists() {
                return;
            }
            thread::sleep(std::time::Duration::from_millis(10));
        }
        panic!("child {} was never reaped", pid);
    }

    #[test]
    fn test_launch_error_display() {
        let err = LaunchError::Unavailable("none of xdg-open found".to_string());
        assert_eq!(err.to_string(), "Browser unavailable: none of xdg-open found");
    }
}
