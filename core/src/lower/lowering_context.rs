//! file: core/src/lower/lowering_context.rs
//! description: shared state threaded through expression lowering.
//!
//! `LoweringContext` borrows the unit's atom registry and the set of
//! top-level names, and tracks which declaration is being lowered so
//! errors can say where they happened. Node numbers are handed out in
//! pre-order, restarting at 0 for every declaration.

use std::collections::HashSet;

use crate::error::{BackendError, BackendErrorKind};
use crate::ir::NodeId;
use crate::location::Location;
use crate::registry::AtomRegistry;
use crate::target::TargetExpr;

pub struct LoweringContext<'a> {
    atoms: &'a mut AtomRegistry,
    globals: &'a HashSet<String>,
    implicit_atoms: bool,
    declaration: String,
    location: Option<Location>,
    next_node: NodeId,
}

impl<'a> LoweringContext<'a> {
    pub fn new(atoms: &'a mut AtomRegistry, globals: &'a HashSet<String>, implicit_atoms: bool) -> Self {
        LoweringContext {
            atoms,
            globals,
            implicit_atoms,
            declaration: String::new(),
            location: None,
            next_node: 0,
        }
    }

    /// Point the context at a new declaration and restart node numbering.
    pub fn enter_declaration(&mut self, name: &str, location: Option<Location>) {
        self.declaration = name.to_string();
        self.location = location;
        self.next_node = 0;
    }

    pub fn declaration(&self) -> &str {
        &self.declaration
    }

    pub fn next_node(&mut self) -> NodeId {
        let id = self.next_node;
        self.next_node += 1;
        id
    }

    pub(crate) fn skip_to(&mut self, node: NodeId) {
        self.next_node = node;
    }

    pub fn is_global(&self, name: &str) -> bool {
        self.globals.contains(name)
    }

    pub fn resolve_atom(&mut self, name: &str, node: NodeId) -> Result<TargetExpr, BackendError> {
        let id = match self.atoms.lookup(name) {
            Some(id) => id,
            None if self.implicit_atoms => self.atoms.register(name),
            None => return Err(self.error(BackendErrorKind::UnknownAtom(name.to_string()), node)),
        };
        Ok(TargetExpr::Const { name: name.to_string(), id })
    }

    pub fn error(&self, kind: BackendErrorKind, node: NodeId) -> BackendError {
        BackendError::new(kind, self.declaration.clone())
            .with_node(node)
            .with_location(self.location.clone())
    }
}
