//! file: core/src/registry/atoms.rs
//! description: atom name to integer identity table.
//!
//! Atoms are nullary named constants. Each distinct name receives the next
//! integer starting at 0, in registration order. Registering a known name
//! returns its existing id. The table lives for one compilation unit.

use std::collections::HashMap;

pub type AtomId = u32;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtomRegistry {
    ids: HashMap<String, AtomId>,
    order: Vec<String>,
}

impl AtomRegistry {
    pub fn new() -> Self {
        AtomRegistry::default()
    }

    /// Return the id of `name`, assigning the next free one on first sight.
    pub fn register(&mut self, name: &str) -> AtomId {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }
        let id = self.order.len() as AtomId;
        self.ids.insert(name.to_string(), id);
        self.order.push(name.to_string());
        log::trace!("atom `{}` registered as {}", name, id);
        id
    }

    pub fn lookup(&self, name: &str) -> Option<AtomId> {
        self.ids.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    /// All `(name, id)` pairs in registration order.
    pub fn emit_all(&self) -> Vec<(String, AtomId)> {
        self.order
            .iter()
            .enumerate()
            .map(|(id, name)| (name.clone(), id as AtomId))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.order.clear();
    }
}
