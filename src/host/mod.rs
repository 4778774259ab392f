//! A minimal terminal host for the editor panel.
//!
//! The host owns what the panel only borrows: the module registry, the
//! settings store and the root class list carrying the dark marker.
//! - [`Host`]: builder with the host's configuration; [`Host::run`] owns the
//!   terminal
//! - [`Session`]: one instantiated module and the host state around it,
//!   independent of the terminal

mod event_loop;
mod session;

pub use session::{HostCommand, Session, host_command};

use std::path::PathBuf;

/// Terminal host that loads the editor panel from a registry.
pub struct Host {
    settings_path: PathBuf,
    dark: bool,
    theme_marker: Option<PathBuf>,
}

impl Host {
    /// Create a host persisting module settings to `settings_path`.
    pub fn new(settings_path: PathBuf) -> Self {
        Self {
            settings_path,
            dark: false,
            theme_marker: None,
        }
    }

    /// Start with the dark marker set.
    pub const fn with_dark(mut self, dark: bool) -> Self {
        self.dark = dark;
        self
    }

    /// Drive the dark marker from the file at `path`.
    pub fn with_theme_marker(mut self, path: Option<PathBuf>) -> Self {
        self.theme_marker = path;
        self
    }
}
