//! Named singleton records resolved at call time instead of hard-coded ids

use crate::core::entity::RecordId;
use std::collections::HashMap;

/// Name under which the counter incremented by `updateCounter` is registered
pub const COUNTER: &str = "counter";

/// Registry of singleton records, filled once at initialization
///
/// Mutations look singletons up by name, so the concrete id only appears in
/// configuration (or is produced by the startup bootstrap).
#[derive(Debug, Clone, Default)]
pub struct SingletonRegistry {
    entries: HashMap<String, RecordId>,
}

impl SingletonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the record behind `name`
    pub fn register(&mut self, name: impl Into<String>, id: RecordId) {
        self.entries.insert(name.into(), id);
    }

    /// Builder-style variant of [`register`](Self::register)
    pub fn with(mut self, name: impl Into<String>, id: RecordId) -> Self {
        self.register(name, id);
        self
    }

    pub fn resolve(&self, name: &str) -> Option<&RecordId> {
        self.entries.get(name)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}
