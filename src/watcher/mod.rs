//! Theme marker file watching.
//!
//! The demo host can drive the dark marker from a plain file: when its
//! trimmed content is `dark` the marker is set, anything else (including a
//! missing file) clears it. Uses the notify crate for cross-platform events.
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::theme::DARK_CLASS;

/// Watches the marker file and reports its debounced dark state.
pub struct ThemeMarkerWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    watch_root: PathBuf,
    target_path: PathBuf,
    target_name: Option<OsString>,
    debounce: Duration,
    pending_since: Option<Instant>,
}

impl ThemeMarkerWatcher {
    /// Create a watcher for the marker at `path`.
    ///
    /// # Errors
    /// Returns an error if the watcher cannot be created or the marker's
    /// directory cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> notify::Result<Self> {
        // Event paths from the OS are canonical.
        let target_path = path
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| path.as_ref().to_path_buf());
        let target_name = target_path.file_name().map(std::ffi::OsStr::to_os_string);
        let watch_root = watch_root_for(&target_path);

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&watch_root, RecursiveMode::NonRecursive)?;
        tracing::debug!(marker = %target_path.display(), "watching theme marker");

        Ok(Self {
            _watcher: watcher,
            rx,
            watch_root,
            target_path,
            target_name,
            debounce,
            pending_since: None,
        })
    }

    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Current dark state of the marker file.
    pub fn is_dark(&self) -> bool {
        read_marker(&self.target_path)
    }

    /// The marker's dark state once a debounced change is ready.
    pub fn poll(&mut self) -> Option<bool> {
        let mut saw_relevant_event = false;
        while let Ok(event) = self.rx.try_recv() {
            match event {
                Ok(ev) if self.is_relevant(&ev) => saw_relevant_event = true,
                Ok(ev) => tracing::trace!(kind = ?ev.kind, paths = ?ev.paths, "irrelevant watch event"),
                Err(err) => tracing::warn!(%err, "theme marker watch error"),
            }
        }

        if saw_relevant_event {
            self.pending_since = Some(Instant::now());
        }

        let pending_since = self.pending_since?;
        if pending_since.elapsed() < self.debounce {
            return None;
        }
        self.pending_since = None;
        Some(self.is_dark())
    }

    fn is_relevant(&self, event: &Event) -> bool {
        event.paths.iter().any(|path| {
            path == &self.watch_root
                || path == &self.target_path
                || self
                    .target_name
                    .as_ref()
                    .is_some_and(|name| path.file_name().is_some_and(|f| f == name))
        })
    }
}

/// Whether the marker file at `path` asks for the dark theme.
pub fn read_marker(path: &Path) -> bool {
    std::fs::read_to_string(path)
        .is_ok_and(|content| content.trim().eq_ignore_ascii_case(DARK_CLASS))
}

fn watch_root_for(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
