//! Registers the editor panel with a host's module registry.

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use crate::module::{HostModule, ModuleProps};
use crate::panel::EditorPanel;
use crate::registry::ModuleRegistry;

/// Identifier the editor panel is registered under.
pub const MODULE_ID: &str = "monaco-editor";

/// Instantiate the editor panel directly, for hosts that link the crate
/// instead of looking the module up.
pub fn create_module(props: ModuleProps) -> Box<dyn HostModule> {
    Box::new(EditorPanel::mount(props))
}

/// Add the editor panel to `registry` under [`MODULE_ID`].
///
/// Calling this again overwrites the entry with the same factory and logs
/// again.
pub fn register(registry: &mut ModuleRegistry) {
    registry.insert(MODULE_ID, create_module);
    tracing::info!(module = MODULE_ID, "editor panel module registered");
}

/// The process-wide registry, created empty on first use.
pub fn global_registry() -> MutexGuard<'static, ModuleRegistry> {
    static GLOBAL: OnceLock<Mutex<ModuleRegistry>> = OnceLock::new();
    GLOBAL
        .get_or_init(|| Mutex::new(ModuleRegistry::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Register the editor panel in the process-wide registry.
pub fn register_global() {
    register(&mut global_registry());
}
