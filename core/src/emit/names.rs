//! file: core/src/emit/names.rs
//! description: identifier escaping for emitted code.
//!
//! Module-level names (pipeline binding, declarations, atoms) are claimed
//! once per unit, in that order, and kept unique. Closure parameters are
//! chosen per scope: they never reuse a module-level name, a reserved word
//! or the name of an enclosing parameter that stands for a different IR
//! variable.

use std::collections::{HashMap, HashSet};

use crate::target::TargetUnit;

#[derive(Debug, Clone)]
pub struct NameTable {
    reserved: HashSet<&'static str>,
    taken: HashSet<String>,
    binding: String,
    decls: HashMap<String, String>,
    atoms: HashMap<String, String>,
}

impl NameTable {
    pub fn new(reserved: &[&'static str]) -> Self {
        NameTable {
            reserved: reserved.iter().copied().collect(),
            taken: HashSet::new(),
            binding: String::new(),
            decls: HashMap::new(),
            atoms: HashMap::new(),
        }
    }

    /// Claim every module-level name of `unit`.
    pub fn for_unit(unit: &TargetUnit, reserved: &[&'static str], pipeline_binding: &str) -> Self {
        let mut table = NameTable::new(reserved);
        table.binding = table.claim(pipeline_binding);
        for func in &unit.functions {
            let name = table.claim(&func.name);
            table.decls.insert(func.name.clone(), name);
        }
        for (atom, _) in &unit.atoms {
            let name = table.claim(atom);
            table.atoms.insert(atom.clone(), name);
        }
        table
    }

    /// Make `name` a legal identifier that is not a reserved word.
    pub fn escape(&self, name: &str) -> String {
        let mut out: String = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
            .collect();
        if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
            out.insert(0, '_');
        }
        while self.reserved.contains(out.as_str()) {
            out.push('_');
        }
        out
    }

    fn claim(&mut self, name: &str) -> String {
        let mut out = self.escape(name);
        while self.taken.contains(&out) || self.reserved.contains(out.as_str()) {
            out.push('_');
        }
        self.taken.insert(out.clone());
        out
    }

    fn is_module_name(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    pub fn binding(&self) -> &str {
        &self.binding
    }

    pub fn decl<'a>(&'a self, name: &'a str) -> &'a str {
        self.decls.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn atom<'a>(&'a self, name: &'a str) -> &'a str {
        self.atoms.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn scope(&self) -> Scope<'_> {
        Scope { table: self, locals: Vec::new() }
    }
}

/// Closure parameters in scope while one definition is rendered.
#[derive(Debug)]
pub struct Scope<'t> {
    table: &'t NameTable,
    locals: Vec<(String, String)>,
}

impl<'t> Scope<'t> {
    pub fn table(&self) -> &'t NameTable {
        self.table
    }

    /// Bring a parameter into scope and return its emitted name.
    pub fn bind(&mut self, ir_name: &str) -> String {
        let mut out = self.table.escape(ir_name);
        loop {
            let shadows_other = self
                .locals
                .iter()
                .any(|(ir, emitted)| emitted == &out && ir != ir_name);
            if !shadows_other && !self.table.is_module_name(&out) && !self.table.reserved.contains(out.as_str()) {
                break;
            }
            out.push('_');
        }
        self.locals.push((ir_name.to_string(), out.clone()));
        out
    }

    pub fn unbind(&mut self) {
        self.locals.pop();
    }

    pub fn local(&self, ir_name: &str) -> String {
        self.locals
            .iter()
            .rev()
            .find(|(ir, _)| ir == ir_name)
            .map(|(_, emitted)| emitted.clone())
            .unwrap_or_else(|| self.table.escape(ir_name))
    }
}
