// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorSurface)
    clippy::module_name_repetitions
)]

//! # Editor Panel
//!
//! A code editor module for host shells that load modules from a registry.
//!
//! The panel edits a single file record with:
//! - Syntax highlighting for eighteen languages plus plain text
//! - A toolbar with the file name, saved indicator, language selector,
//!   new-file button and character/line counters
//! - Light and dark themes that follow the host's dark marker live
//! - Persistence of the record into the host's settings after every change
//!
//! ## Architecture
//!
//! The panel uses The Elm Architecture (TEA) pattern:
//! - **Model**: the file record and selector state
//! - **Message**: edits, language changes, new file
//! - **Update**: pure state transitions
//! - **View**: render to terminal
//!
//! Host capabilities (settings, theme) are injected through
//! [`module::ModuleProps`] as trait objects.
//!
//! ## Modules
//!
//! - [`panel`]: the editor panel module
//! - [`registrar`]: registration under `monaco-editor`
//! - [`registry`]: module id to factory mapping
//! - [`settings`]: settings store capability and implementations
//! - [`theme`]: dark marker observation
//! - [`editor`]: the embedded text surface
//! - [`highlight`]: syntax highlighting
//! - [`ui`]: terminal rendering
//! - [`host`], [`config`], [`watcher`]: the demo terminal host

pub mod config;
pub mod editor;
pub mod file;
pub mod highlight;
pub mod host;
pub mod module;
pub mod panel;
pub mod registrar;
pub mod registry;
pub mod settings;
pub mod theme;
pub mod ui;
pub mod watcher;

pub use registrar::create_module;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::file::{FileRecord, Language};
    pub use crate::module::{HostModule, ModuleFactory, ModuleProps};
    pub use crate::panel::EditorPanel;
    pub use crate::registrar::{MODULE_ID, create_module, register};
    pub use crate::registry::ModuleRegistry;
    pub use crate::settings::{Settings, SettingsStore};
    pub use crate::theme::{EditorTheme, ThemeSource, ThemeSubscription};
}
