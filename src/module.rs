//! The contract between a host shell and the modules it loads.

use std::fmt;
use std::rc::Rc;

use crossterm::event::Event;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::settings::SettingsStore;
use crate::theme::ThemeSource;

/// Inputs a host hands to a module when instantiating it.
///
/// Only the capabilities a module consumes are passed. Messaging and window
/// state are host concerns that no module here uses.
#[derive(Clone)]
pub struct ModuleProps {
    pub module_id: String,
    /// Whether the module's window has focus. Accepted but not used to gate
    /// behavior.
    pub is_active: bool,
    pub settings: Rc<dyn SettingsStore>,
    pub theme: Rc<dyn ThemeSource>,
}

impl fmt::Debug for ModuleProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleProps")
            .field("module_id", &self.module_id)
            .field("is_active", &self.is_active)
            .finish_non_exhaustive()
    }
}

/// A module instance living inside a host window.
pub trait HostModule {
    fn module_id(&self) -> &str;

    /// Called once per host loop iteration before input is handled.
    fn tick(&mut self) {}

    /// Offer a terminal event. Returns `true` if the module consumed it.
    fn handle_event(&mut self, event: &Event) -> bool;

    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Constructor stored in a module registry.
pub type ModuleFactory = fn(ModuleProps) -> Box<dyn HostModule>;
