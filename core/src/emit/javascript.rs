//! file: core/src/emit/javascript.rs
//! description: JavaScript (ES module) spelling of lowered units.
//!
//! Tuples are arrays. Functions, values, atoms and the pipeline are all
//! exported so the module can be imported as is.

use crate::config::TargetKind;
use crate::ir::Type;
use crate::registry::AtomId;
use crate::target::TargetExpr;

use super::names::Scope;
use super::{format_number, Position, Target};

pub struct JavascriptTarget;

const JAVASCRIPT_RESERVED: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "implements",
    "import", "in", "instanceof", "interface", "let", "new", "null", "package", "private", "protected",
    "public", "return", "static", "super", "switch", "this", "throw", "true", "try", "typeof", "var",
    "void", "while", "with", "yield", "arguments", "eval", "undefined", "NaN", "Infinity",
    // intrinsics the emitted code relies on
    "equal", "JSON", "Array",
];

impl Target for JavascriptTarget {
    fn kind(&self) -> TargetKind {
        TargetKind::Javascript
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        JAVASCRIPT_RESERVED
    }

    /// Structural equality returning 0/1, shared by every `EqInt`. Arrays
    /// compare by their JSON form, everything else by identity.
    fn prelude(&self, indent: &str) -> String {
        format!(
            "// function \"equal\" has type (a -> (a -> Atom))\nfunction equal(a, b) {{\n{}return +(a === b || (Array.isArray(a) && Array.isArray(b) && JSON.stringify(a) === JSON.stringify(b)));\n}}\n\n",
            indent
        )
    }

    fn definition(&self, signature: &Type, name: &str, param: &str, body: &str, indent: &str) -> String {
        format!(
            "// signature: {}\nexport function {}({}) {{\n{}return {};\n}}\n\n",
            signature, name, param, indent, body
        )
    }

    fn atom_binding(&self, name: &str, id: AtomId) -> String {
        format!("export const {} = {};\n", name, id)
    }

    fn value_binding(&self, signature: &Type, name: &str, value: &str) -> String {
        format!("// signature: {}\nexport const {} = {};\n", signature, name, value)
    }

    fn pipeline_binding(&self, binding: &str, entries: &[&str]) -> String {
        format!("export const {} = [{}];\n", binding, entries.join(", "))
    }

    fn expr(&self, expr: &TargetExpr, scope: &mut Scope<'_>, pos: Position) -> String {
        match expr {
            TargetExpr::Num(value) => format_number(*value, "NaN", "Infinity"),
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
                    Position::Open => format!("({}) => {}", param, body),
                    Position::Operand => format!("(({}) => {})", param, body),
                }
            }
            TargetExpr::Ternary { cond, then, otherwise } => format!(
                "({} ? {} : {})",
                self.expr(cond, scope, Position::Operand),
                self.expr(then, scope, Position::Operand),
                self.expr(otherwise, scope, Position::Operand)
            ),
            TargetExpr::EqInt { lhs, rhs } => format!(
                "equal({}, {})",
                self.expr(lhs, scope, Position::Open),
                self.expr(rhs, scope, Position::Open)
            ),
            TargetExpr::CmpInt { op, lhs, rhs } => format!(
                "+({} {} {})",
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
            TargetExpr::Tail(list) => format!("{}.slice(1)", self.expr(list, scope, Position::Operand)),
            TargetExpr::Prepend { head, tail } => format!(
                "[{}, ...{}]",
                self.expr(head, scope, Position::Open),
                self.expr(tail, scope, Position::Operand)
            ),
            TargetExpr::Length(list) => format!("{}.length", self.expr(list, scope, Position::Operand)),
            TargetExpr::Concat { lhs, rhs } => format!(
                "{}.concat({})",
                self.expr(lhs, scope, Position::Operand),
                self.expr(rhs, scope, Position::Open)
            ),
            TargetExpr::Slice { list, from, to } => format!(
                "{}.slice({}, {})",
                self.expr(list, scope, Position::Operand),
                self.expr(from, scope, Position::Open),
                self.expr(to, scope, Position::Open)
            ),
            TargetExpr::Tuple(items) => {
                let items: Vec<String> = items
                    .iter()
                    .map(|item| self.expr(item, scope, Position::Open))
                    .collect();
                format!("[{}]", items.join(", "))
            }
            TargetExpr::Project { tuple, index } => {
                format!("{}[{}]", self.expr(tuple, scope, Position::Operand), index)
            }
        }
    }
}
