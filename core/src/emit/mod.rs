//! Rendering of a lowered `TargetUnit` into target-language source text.
//!
//! The layout is the same for every target: optional prelude, one
//! definition per function declaration (signature annotation first), the
//! atom constant block, value bindings, two blank lines and the pipeline
//! binding. The trailing sections are written even when they are empty.
//! A `Target` only decides spelling.

pub mod javascript;
pub mod names;
pub mod python;

use crate::config::{BackendConfig, TargetKind};
use crate::error::{BackendError, BackendErrorKind};
use crate::ir::Type;
use crate::registry::AtomId;
use crate::target::{TargetExpr, TargetFunction, TargetUnit};

pub use javascript::JavascriptTarget;
pub use names::{NameTable, Scope};
pub use python::PythonTarget;

/// Where an expression is rendered. Lambdas only go bare where the
/// target's grammar cannot swallow surrounding tokens into their body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Open,
    Operand,
}

pub trait Target {
    fn kind(&self) -> TargetKind;
    fn reserved_words(&self) -> &'static [&'static str];

    fn prelude(&self, _indent: &str) -> String {
        String::new()
    }

    fn definition(&self, signature: &Type, name: &str, param: &str, body: &str, indent: &str) -> String;
    fn atom_binding(&self, name: &str, id: AtomId) -> String;
    fn value_binding(&self, signature: &Type, name: &str, value: &str) -> String;
    fn pipeline_binding(&self, binding: &str, entries: &[&str]) -> String;

    fn expr(&self, expr: &TargetExpr, scope: &mut Scope<'_>, pos: Position) -> String;
}

pub fn target_for(kind: TargetKind) -> Box<dyn Target> {
    match kind {
        TargetKind::Python => Box::new(PythonTarget),
        TargetKind::Javascript => Box::new(JavascriptTarget),
    }
}

/// Render a number the way both targets accept it: always with a fractional
/// part or exponent, negatives parenthesized.
pub(crate) fn format_number(value: f64, nan: &str, infinity: &str) -> String {
    if value.is_nan() {
        return nan.to_string();
    }
    let magnitude = if value.is_infinite() {
        infinity.to_string()
    } else {
        format!("{:?}", value.abs())
    };
    if value.is_sign_negative() {
        format!("(-{})", magnitude)
    } else {
        magnitude
    }
}

/// Render one lowered declaration.
pub fn emit_declaration(func: &TargetFunction, target: &dyn Target, table: &NameTable, indent: &str) -> String {
    let mut scope = table.scope();
    let name = table.decl(&func.name);
    match &func.param {
        Some(param) => {
            let param = scope.bind(param);
            let body = target.expr(&func.body, &mut scope, Position::Open);
            target.definition(&func.signature, name, &param, &body, indent)
        }
        None => {
            let value = target.expr(&func.body, &mut scope, Position::Open);
            target.value_binding(&func.signature, name, &value)
        }
    }
}

/// Render a whole unit with the target selected in `config`.
pub fn emit_unit(unit: &TargetUnit, config: &BackendConfig) -> Result<String, BackendError> {
    let target = target_for(config.target);
    emit_unit_with(unit, target.as_ref(), config)
}

pub fn emit_unit_with(unit: &TargetUnit, target: &dyn Target, config: &BackendConfig) -> Result<String, BackendError> {
    for entry in &unit.pipelines {
        if unit.function(entry).is_none() {
            return Err(BackendError::new(
                BackendErrorKind::UnknownPipelineStage(entry.clone()),
                config.pipeline_binding.clone(),
            ));
        }
    }

    let table = NameTable::for_unit(unit, target.reserved_words(), &config.pipeline_binding);
    let indent = " ".repeat(config.indent);

    let mut out = target.prelude(&indent);
    for func in unit.definitions() {
        out.push_str(&emit_declaration(func, target, &table, &indent));
    }
    for (name, id) in &unit.atoms {
        out.push_str(&target.atom_binding(table.atom(name), *id));
    }
    for func in unit.values() {
        out.push_str(&emit_declaration(func, target, &table, &indent));
    }
    out.push_str("\n\n");
    let entries: Vec<&str> = unit.pipelines.iter().map(|e| table.decl(e)).collect();
    out.push_str(&target.pipeline_binding(table.binding(), &entries));

    log::debug!(
        "emitted {} for {} declaration(s), {} bytes",
        target.kind(),
        unit.functions.len(),
        out.len()
    );
    Ok(out)
}
