//! file: core/src/emit/python.rs
//! description: Python spelling of lowered units.
//!
//! Equality and comparisons are wrapped in `int(...)` so they yield 0/1.
//! Tuples are Python tuples; slice bounds go through `int(...)` because
//! numbers are floats at run time.
//! Multi-way conditionals come out right-nested, e.g.
//! `(42.0 if int(what == WORLD) else (10.0 if int(what == MA) else 0.0))`.

use crate::config::TargetKind;
use crate::ir::Type;
use crate::registry::AtomId;
use crate::target::TargetExpr;

use super::names::Scope;
use super::{format_number, Position, Target};

pub struct PythonTarget;

const PYTHON_RESERVED: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class", "continue", "def",
    "del", "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is",
    "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
    // builtins the emitted code calls
    "int", "len", "float",
];

impl Target for PythonTarget {
    fn kind(&self) -> TargetKind {
        TargetKind::Python
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        PYTHON_RESERVED
    }

    fn definition(&self, signature: &Type, name: &str, param: &str, body: &str, indent: &str) -> String {
        format!(
            "# signature: {}\ndef {}({}):\n{}return {}\n\n",
            signature, name, param, indent, body
        )
    }

    fn atom_binding(&self, name: &str, id: AtomId) -> String {
        format!("{} = {};\n", name, id)
    }

    fn value_binding(&self, signature: &Type, name: &str, value: &str) -> String {
        format!("# signature: {}\n{} = {};\n", signature, name, value)
    }

    fn pipeline_binding(&self, binding: &str, entries: &[&str]) -> String {
        format!("{} = [{}];\n", binding, entries.join(", "))
    }

    fn expr(&self, expr: &TargetExpr, scope: &mut Scope<'_>, pos: Position) -> String {
        match expr {
            TargetExpr::Num(value) => format_number(*value, "float('nan')", "float('inf')"),
            TargetExpr::Const { name, .. } => scope.table().atom(name).to_string(),
            TargetExpr::Local(name) => scope.local(name),
            TargetExpr::Global(name) => scope.table().decl(name).to_string(),
            TargetExpr::Call { func, arg } => {
                let func = self.expr(func, scope, Position::Operand);
                let arg = self.expr(arg, scope, Position::Open);
                format!("{}({})", func, arg)
            }
            TargetExpr::Lambda { param, body } => {
                let param = scope.bind(param);
                let body = self.expr(body, scope, Position::Open);
                scope.unbind();
                match pos {
                    Position::Open => format!("lambda {}: {}", param, body),
                    Position::Operand => format!("(lambda {}: {})", param, body),
                }
            }
            TargetExpr::Ternary { cond, then, otherwise } => format!(
                "({} if {} else {})",
                self.expr(then, scope, Position::Operand),
                self.expr(cond, scope, Position::Operand),
                self.expr(otherwise, scope, Position::Operand)
            ),
            TargetExpr::EqInt { lhs, rhs } => format!(
                "int({} == {})",
                self.expr(lhs, scope, Position::Operand),
                self.expr(rhs, scope, Position::Operand)
            ),
            TargetExpr::CmpInt { op, lhs, rhs } => format!(
                "int({} {} {})",
                self.expr(lhs, scope, Position::Operand),
                op.symbol(),
                self.expr(rhs, scope, Position::Operand)
            ),
            TargetExpr::Arith { op, lhs, rhs } => format!(
                "({} {} {})",
                self.expr(lhs, scope, Position::Operand),
                op.symbol(),
                self.expr(rhs, scope, Position::Operand)
            ),
            TargetExpr::Array(items) => {
                let items: Vec<String> = items
                    .iter()
                    .map(|item| self.expr(item, scope, Position::Open))
                    .collect();
                format!("[{}]", items.join(", "))
            }
            TargetExpr::Head(list) => format!("{}[0]", self.expr(list, scope, Position::Operand)),
            TargetExpr::Tail(list) => format!("{}[1:]", self.expr(list, scope, Position::Operand)),
            TargetExpr::Prepend { head, tail } => format!(
                "([{}] + {})",
                self.expr(head, scope, Position::Open),
                self.expr(tail, scope, Position::Operand)
            ),
            TargetExpr::Length(list) => format!("len({})", self.expr(list, scope, Position::Open)),
            TargetExpr::Concat { lhs, rhs } => format!(
                "({} + {})",
                self.expr(lhs, scope, Position::Operand),
                self.expr(rhs, scope, Position::Operand)
            ),
            TargetExpr::Slice { list, from, to } => format!(
                "{}[int({}):int({})]",
                self.expr(list, scope, Position::Operand),
                self.expr(from, scope, Position::Open),
                self.expr(to, scope, Position::Open)
            ),
            TargetExpr::Tuple(items) => {
                let items: Vec<String> = items
                    .iter()
                    .map(|item| self.expr(item, scope, Position::Open))
                    .collect();
                match items.as_slice() {
                    [single] => format!("({},)", single),
                    _ => format!("({})", items.join(", ")),
                }
            }
            TargetExpr::Project { tuple, index } => {
                format!("{}[{}]", self.expr(tuple, scope, Position::Operand), index)
            }
        }
    }
}
