//! file: core/src/registry/pipeline.rs
//! description: ordered pipeline entries of a compilation unit.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineRegistry {
    entries: Vec<String>,
}

impl PipelineRegistry {
    pub fn new() -> Self {
        PipelineRegistry::default()
    }

    /// Append a declaration name. Order is preserved and repeats are kept.
    pub fn register(&mut self, name: impl Into<String>) {
        let name = name.into();
        log::trace!("pipeline entry `{}` registered", name);
        self.entries.push(name);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
