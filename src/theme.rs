//! Host-wide light/dark state and the observers watching it.
//!
//! A host exposes its visual state through [`ThemeSource`]. The concrete
//! [`RootClassList`] mirrors a document root element: the host is in dark
//! mode while the class list contains [`DARK_CLASS`], and every mutation of
//! the list notifies the registered observers.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

/// Marker class signalling dark mode on the root.
pub const DARK_CLASS: &str = "dark";

/// Rendering theme of the editor surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorTheme {
    #[default]
    Light,
    Dark,
}

impl EditorTheme {
    pub const fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Theme name understood by the editor surface.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Light => "vs-light",
            Self::Dark => "vs-dark",
        }
    }
}

/// Callback invoked with the new dark flag after the host state changes.
pub type ThemeCallback = Box<dyn FnMut(bool)>;

/// Read and observe the host's dark-mode flag.
pub trait ThemeSource {
    fn is_dark(&self) -> bool;

    /// Register `callback` until the returned subscription is dropped.
    fn subscribe(&self, callback: ThemeCallback) -> ThemeSubscription;
}

/// Guard for a registered theme observer. Dropping it disconnects.
#[must_use = "dropping the subscription disconnects the observer"]
pub struct ThemeSubscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl ThemeSubscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Disconnect now rather than at drop.
    pub fn disconnect(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for ThemeSubscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for ThemeSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeSubscription")
            .field("connected", &self.release.is_some())
            .finish()
    }
}

#[derive(Default)]
struct ClassListInner {
    classes: BTreeSet<String>,
    observers: Vec<(u64, ThemeCallback)>,
    next_id: u64,
    notifying: bool,
    released_while_notifying: Vec<u64>,
}

impl ClassListInner {
    fn release(&mut self, id: u64) {
        if self.notifying {
            self.released_while_notifying.push(id);
        }
        self.observers.retain(|(observer, _)| *observer != id);
    }
}

/// Class list of the host's root element.
///
/// Cloning shares the same underlying list.
#[derive(Clone, Default)]
pub struct RootClassList {
    inner: Rc<RefCell<ClassListInner>>,
}

impl RootClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// A class list that starts in dark mode when `dark` is set.
    pub fn with_dark(dark: bool) -> Self {
        let list = Self::new();
        if dark {
            list.inner
                .borrow_mut()
                .classes
                .insert(DARK_CLASS.to_string());
        }
        list
    }

    pub fn contains(&self, class: &str) -> bool {
        self.inner.borrow().classes.contains(class)
    }

    pub fn add(&self, class: &str) {
        let changed = self.inner.borrow_mut().classes.insert(class.to_string());
        if changed {
            self.notify();
        }
    }

    pub fn remove(&self, class: &str) {
        let changed = self.inner.borrow_mut().classes.remove(class);
        if changed {
            self.notify();
        }
    }

    /// Flip `class`, returning whether it is now present.
    pub fn toggle(&self, class: &str) -> bool {
        let present = self.contains(class);
        if present {
            self.remove(class);
        } else {
            self.add(class);
        }
        !present
    }

    /// Add or remove the dark marker.
    pub fn set_dark(&self, dark: bool) {
        if dark {
            self.add(DARK_CLASS);
        } else {
            self.remove(DARK_CLASS);
        }
    }

    /// Number of connected observers.
    pub fn observer_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }

    fn notify(&self) {
        let dark = self.is_dark();
        let mut observers = {
            let mut inner = self.inner.borrow_mut();
            inner.notifying = true;
            std::mem::take(&mut inner.observers)
        };

        // Observers may read or subscribe to the list, so no borrow is held here.
        for (_, callback) in &mut observers {
            callback(dark);
        }

        let mut inner = self.inner.borrow_mut();
        inner.notifying = false;
        let released = std::mem::take(&mut inner.released_while_notifying);
        observers.retain(|(id, _)| !released.contains(id));
        observers.append(&mut inner.observers);
        inner.observers = observers;
    }
}

impl ThemeSource for RootClassList {
    fn is_dark(&self) -> bool {
        self.contains(DARK_CLASS)
    }

    fn subscribe(&self, callback: ThemeCallback) -> ThemeSubscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.observers.push((id, callback));
            id
        };
        let weak: Weak<RefCell<ClassListInner>> = Rc::downgrade(&self.inner);
        ThemeSubscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().release(id);
            }
        })
    }
}
