//! The editor panel module.
//!
//! This module follows The Elm Architecture (TEA):
//! - [`PanelModel`]: the file record and selector state
//! - [`Message`]: everything that can change that state
//! - [`update`]: pure state transitions
//! - [`EditorPanel`]: owns the model, the embedded surface and the host
//!   capabilities, and mirrors every file change into the settings store

mod input;
mod model;
mod update;

pub use input::{PanelInput, map_event};
pub use model::{PanelModel, ToolbarView};
pub use update::{Message, update};

use std::cell::Cell;
use std::rc::Rc;

use crossterm::event::Event;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::editor::{EditorSurface, SurfaceChange, SurfaceEdit, SurfaceOptions};
use crate::file::{FileRecord, Language};
use crate::module::{HostModule, ModuleProps};
use crate::settings::{self, SettingsStore};
use crate::theme::{EditorTheme, ThemeSubscription};

/// A text editor bound to a single [`FileRecord`].
pub struct EditorPanel {
    module_id: String,
    is_active: bool,
    model: PanelModel,
    surface: EditorSurface,
    settings: Rc<dyn SettingsStore>,
    dark: Rc<Cell<bool>>,
    _theme_subscription: ThemeSubscription,
}

impl EditorPanel {
    /// Mount a panel with the default surface options.
    pub fn mount(props: ModuleProps) -> Self {
        Self::mount_with_options(props, SurfaceOptions::default())
    }

    /// Mount a panel, restoring `currentFile` from the host settings when it
    /// is present and well-formed.
    pub fn mount_with_options(props: ModuleProps, options: SurfaceOptions) -> Self {
        let ModuleProps {
            module_id,
            is_active,
            settings,
            theme,
        } = props;

        let file = settings::current_file(&settings.get()).unwrap_or_default();
        let surface = EditorSurface::new(&file.content, options);

        let dark = Rc::new(Cell::new(theme.is_dark()));
        let sink = Rc::clone(&dark);
        let theme_subscription = theme.subscribe(Box::new(move |is_dark| {
            tracing::debug!(theme = EditorTheme::from_dark(is_dark).name(), "theme changed");
            sink.set(is_dark);
        }));

        tracing::debug!(module_id = %module_id, file = %file.name, "editor panel mounted");
        let panel = Self {
            module_id,
            is_active,
            model: PanelModel::new(file),
            surface,
            settings,
            dark,
            _theme_subscription: theme_subscription,
        };
        panel.persist();
        panel
    }

    pub const fn file(&self) -> &FileRecord {
        &self.model.file
    }

    pub const fn model(&self) -> &PanelModel {
        &self.model
    }

    pub const fn surface(&self) -> &EditorSurface {
        &self.surface
    }

    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Theme the surface is rendered with.
    pub fn theme(&self) -> EditorTheme {
        EditorTheme::from_dark(self.dark.get())
    }

    pub fn toolbar(&self) -> ToolbarView {
        self.model.toolbar()
    }

    /// Apply `msg`, then write the record to the host settings if it changed.
    pub fn dispatch(&mut self, msg: Message) {
        let persist = match &msg {
            Message::PickerCommit => self.model.picker_open(),
            other => other.mutates_file(),
        };
        self.model = update(std::mem::take(&mut self.model), msg);
        if persist {
            // The surface is bound to the record's content.
            self.surface.set_value(&self.model.file.content);
            self.persist();
        }
    }

    /// Handle a change event from the surface.
    pub fn handle_change(&mut self, value: Option<String>) {
        self.dispatch(Message::ContentChanged(value));
    }

    pub fn change_language(&mut self, language: Language) {
        self.dispatch(Message::ChangeLanguage(language));
    }

    /// Start over with an untitled file. Unsaved content is discarded.
    pub fn new_file(&mut self) {
        self.dispatch(Message::NewFile);
    }

    /// Perform an edit on the surface and feed its change event back.
    pub fn edit(&mut self, edit: SurfaceEdit) {
        if let Some(SurfaceChange(value)) = self.surface.apply(edit) {
            self.handle_change(value);
        }
    }

    /// Let the surface finish loading.
    pub fn surface_ready(&mut self) {
        if !self.surface.is_ready() {
            crate::highlight::warm_up();
            self.surface.mark_ready();
        }
    }

    pub(crate) const fn surface_mut(&mut self) -> &mut EditorSurface {
        &mut self.surface
    }

    fn persist(&self) {
        let merged = settings::with_current_file(&self.settings.get(), &self.model.file);
        self.settings.set(merged);
    }
}

impl HostModule for EditorPanel {
    fn module_id(&self) -> &str {
        &self.module_id
    }

    fn tick(&mut self) {
        self.surface_ready();
    }

    fn handle_event(&mut self, event: &Event) -> bool {
        match map_event(event, &self.model) {
            Some(PanelInput::Panel(msg)) => {
                self.dispatch(msg);
                true
            }
            Some(PanelInput::Surface(edit)) => {
                self.edit(edit);
                true
            }
            None => false,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        crate::ui::render(self, frame, area);
    }
}

impl Drop for EditorPanel {
    fn drop(&mut self) {
        let SurfaceChange(value) = self.surface.teardown();
        self.handle_change(value);
    }
}
