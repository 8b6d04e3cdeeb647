//! Insertion-ordered module registry.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::module::Module;

/// Registry mapping module names to their implementations.
///
/// Iteration order is insertion order: the load phase walks it forward,
/// the dispose phase walks it backward.
pub struct ModuleRegistry {
    modules: IndexMap<String, Arc<dyn Module>>,
}

impl ModuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            modules: IndexMap::new(),
        }
    }

    /// Insert a module under its own name.
    ///
    /// Re-inserting an existing name replaces the module in place: the
    /// entry keeps its original position in iteration order.
    pub fn insert(&mut self, module: Arc<dyn Module>) {
        tracing::debug!(module = module.name(), "module registered");
        let _ = self.modules.insert(module.name().to_owned(), module);
    }

    /// Look up a module by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Module>> {
        self.modules.get(name).cloned()
    }

    /// Whether a module with the given name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// All module names, in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.modules.keys().cloned().collect()
    }

    /// Snapshot of all modules, in insertion order.
    ///
    /// The lifecycle sweeps iterate the snapshot so no lock is held across
    /// an await point.
    pub fn snapshot(&self) -> Vec<Arc<dyn Module>> {
        self.modules.values().cloned().collect()
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
