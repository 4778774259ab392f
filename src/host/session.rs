use std::rc::Rc;

use anyhow::{Result, anyhow};
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::Frame;

use crate::module::{HostModule, ModuleProps};
use crate::registrar::{self, MODULE_ID};
use crate::registry::ModuleRegistry;
use crate::settings::SettingsStore;
use crate::theme::{DARK_CLASS, RootClassList};

/// Keys the host handles before the module sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    Quit,
    ToggleDark,
}

pub fn host_command(event: &Event) -> Option<HostCommand> {
    let Event::Key(key) = event else {
        return None;
    };
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(HostCommand::Quit)
        }
        KeyCode::F(2) => Some(HostCommand::ToggleDark),
        _ => None,
    }
}

/// The editor module as loaded by the host, plus the host-owned state it
/// observes.
pub struct Session {
    root: RootClassList,
    module: Box<dyn HostModule>,
    should_quit: bool,
}

impl Session {
    /// Register the editor panel and instantiate it from the registry.
    ///
    /// # Errors
    /// Returns an error if the registry has no entry for the editor panel.
    pub fn open(settings: Rc<dyn SettingsStore>, root: RootClassList) -> Result<Self> {
        let mut registry = ModuleRegistry::new();
        registrar::register(&mut registry);

        let props = ModuleProps {
            module_id: format!("{MODULE_ID}-1"),
            is_active: true,
            settings,
            theme: Rc::new(root.clone()),
        };
        let module = registry
            .instantiate(MODULE_ID, props)
            .ok_or_else(|| anyhow!("module {MODULE_ID} is not registered"))?;

        Ok(Self {
            root,
            module,
            should_quit: false,
        })
    }

    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub const fn root(&self) -> &RootClassList {
        &self.root
    }

    pub fn module(&self) -> &dyn HostModule {
        self.module.as_ref()
    }

    pub fn tick(&mut self) {
        self.module.tick();
    }

    /// Route `event` to the host or the module. Returns `true` if anything
    /// handled it.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match host_command(event) {
            Some(HostCommand::Quit) => {
                self.should_quit = true;
                true
            }
            Some(HostCommand::ToggleDark) => {
                let dark = self.root.toggle(DARK_CLASS);
                tracing::debug!(dark, "dark marker toggled");
                true
            }
            None => self.module.handle_event(event),
        }
    }

    /// Mirror an external dark state onto the root marker.
    pub fn apply_marker(&mut self, dark: bool) {
        self.root.set_dark(dark);
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.module.render(frame, area);
    }
}
