//! Per-unit registries shared by lowering and emission.
//!
//! A `Session` owns both registries for exactly one compilation unit. It is
//! created empty, filled while declarations are lowered and read once when
//! the unit is rendered. Nothing here is global.

pub mod atoms;
pub mod pipeline;

pub use atoms::{AtomId, AtomRegistry};
pub use pipeline::PipelineRegistry;

#[derive(Debug, Clone, Default)]
pub struct Session {
    atoms: AtomRegistry,
    pipelines: PipelineRegistry,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn atoms(&self) -> &AtomRegistry {
        &self.atoms
    }

    pub fn atoms_mut(&mut self) -> &mut AtomRegistry {
        &mut self.atoms
    }

    pub fn pipelines(&self) -> &PipelineRegistry {
        &self.pipelines
    }

    pub fn pipelines_mut(&mut self) -> &mut PipelineRegistry {
        &mut self.pipelines
    }

    /// Drop everything registered so far, ready for the next unit.
    pub fn reset(&mut self) {
        self.atoms.clear();
        self.pipelines.clear();
    }
}
