//! Module registry: maps module identifiers to factories.
//!
//! Hosts look modules up by identifier at runtime instead of depending on
//! them at build time. A registry only grows; entries are overwritten, never
//! removed.

use std::collections::BTreeMap;

use crate::module::{HostModule, ModuleFactory, ModuleProps};

#[derive(Debug, Default, Clone)]
pub struct ModuleRegistry {
    modules: BTreeMap<String, ModuleFactory>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `id`, replacing any previous entry.
    ///
    /// Returns the factory that was replaced, if any.
    pub fn insert(&mut self, id: impl Into<String>, factory: ModuleFactory) -> Option<ModuleFactory> {
        self.modules.insert(id.into(), factory)
    }

    pub fn get(&self, id: &str) -> Option<ModuleFactory> {
        self.modules.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.modules.contains_key(id)
    }

    /// Instantiate the module registered under `id`.
    pub fn instantiate(&self, id: &str, props: ModuleProps) -> Option<Box<dyn HostModule>> {
        self.get(id).map(|factory| factory(props))
    }

    /// Registered identifiers in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crossterm::event::Event;
    use ratatui::Frame;
    use ratatui::layout::Rect;

    use super::*;
    use crate::settings::MemorySettingsStore;
    use crate::theme::RootClassList;

    struct Probe(String);

    impl HostModule for Probe {
        fn module_id(&self) -> &str {
            &self.0
        }

        fn handle_event(&mut self, _event: &Event) -> bool {
            false
        }

        fn render(&mut self, _frame: &mut Frame, _area: Rect) {}
    }

    fn probe(props: ModuleProps) -> Box<dyn HostModule> {
        Box::new(Probe(props.module_id))
    }

    fn other(_props: ModuleProps) -> Box<dyn HostModule> {
        Box::new(Probe("other".to_string()))
    }

    fn props(id: &str) -> ModuleProps {
        ModuleProps {
            module_id: id.to_string(),
            is_active: true,
            settings: Rc::new(MemorySettingsStore::default()),
            theme: Rc::new(RootClassList::new()),
        }
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = ModuleRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get("probe").is_none());
    }

    #[test]
    fn test_instantiate_registered_module() {
        let mut registry = ModuleRegistry::new();
        registry.insert("probe", probe);
        let module = registry.instantiate("probe", props("window-1")).unwrap();
        assert_eq!(module.module_id(), "window-1");
    }

    #[test]
    fn test_instantiate_unknown_is_none() {
        let registry = ModuleRegistry::new();
        assert!(registry.instantiate("missing", props("w")).is_none());
    }

    #[test]
    fn test_insert_overwrites_same_key() {
        let mut registry = ModuleRegistry::new();
        assert!(registry.insert("probe", probe).is_none());
        assert!(registry.insert("probe", other).is_some());
        assert_eq!(registry.len(), 1);
        let module = registry.instantiate("probe", props("w")).unwrap();
        assert_eq!(module.module_id(), "other");
    }

    #[test]
    fn test_other_entries_survive_insert() {
        let mut registry = ModuleRegistry::new();
        registry.insert("a", probe);
        registry.insert("b", other);
        registry.insert("a", other);
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
