use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;

use crate::settings::{JsonFileSettingsStore, SettingsStore};
use crate::theme::RootClassList;
use crate::watcher::{self, ThemeMarkerWatcher};

use super::{Host, Session};

const MARKER_DEBOUNCE: Duration = Duration::from_millis(200);

impl Host {
    /// Run the host until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be loaded, the terminal
    /// cannot be initialized, or terminal I/O fails.
    pub fn run(self) -> Result<()> {
        let store = JsonFileSettingsStore::open(&self.settings_path).with_context(|| {
            format!("Failed to open settings {}", self.settings_path.display())
        })?;
        let settings: Rc<dyn SettingsStore> = Rc::new(store);

        let marker_dark = self.theme_marker.as_deref().is_some_and(watcher::read_marker);
        let root = RootClassList::with_dark(self.dark || marker_dark);

        let marker_watcher = self.theme_marker.as_ref().and_then(|path| {
            ThemeMarkerWatcher::new(path, MARKER_DEBOUNCE)
                .inspect_err(|err| {
                    tracing::warn!(%err, marker = %path.display(), "theme marker watch unavailable");
                })
                .ok()
        });

        let mut session = Session::open(settings, root)?;

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; editor-panel requires an interactive terminal")?;
        let result = Self::event_loop(&mut terminal, &mut session, marker_watcher);
        ratatui::restore();

        result
    }

    fn event_loop(
        terminal: &mut DefaultTerminal,
        session: &mut Session,
        mut marker_watcher: Option<ThemeMarkerWatcher>,
    ) -> Result<()> {
        let mut needs_render = true;
        let mut loaded = false;

        loop {
            if let Some(dark) = marker_watcher.as_mut().and_then(ThemeMarkerWatcher::poll) {
                session.apply_marker(dark);
                needs_render = true;
            }

            let poll_ms = if needs_render || !loaded { 0 } else { 100 };
            if event::poll(Duration::from_millis(poll_ms))? {
                if session.handle_event(&event::read()?) {
                    needs_render = true;
                }
                // Coalesce key repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    if session.handle_event(&event::read()?) {
                        needs_render = true;
                    }
                }
            }

            if session.should_quit() {
                break;
            }

            if needs_render {
                terminal.draw(|frame| session.draw(frame))?;
                needs_render = false;
            }

            // First frame shows the loading placeholder.
            if !loaded {
                session.tick();
                loaded = true;
                needs_render = true;
            }
        }
        Ok(())
    }
}
