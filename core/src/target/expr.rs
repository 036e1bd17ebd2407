//! file: core/src/target/expr.rs
//! description: target-neutral expression tree produced by lowering.
//!
//! `TargetExpr` is what every emitter renders and what the reference
//! evaluator executes. Equality and comparisons already carry their 0/1
//! coercion here; emitters only choose the spelling.

use crate::ir::{ArithmeticOperator, ComparisonOperator};
use crate::registry::AtomId;

#[derive(Debug, Clone, PartialEq)]
pub enum TargetExpr {
    Num(f64),
    /// Reference to a module-level atom constant.
    Const { name: String, id: AtomId },
    Local(String),
    Global(String),
    Call { func: Box<TargetExpr>, arg: Box<TargetExpr> },
    Lambda { param: String, body: Box<TargetExpr> },
    Ternary { cond: Box<TargetExpr>, then: Box<TargetExpr>, otherwise: Box<TargetExpr> },
    EqInt { lhs: Box<TargetExpr>, rhs: Box<TargetExpr> },
    CmpInt { op: ComparisonOperator, lhs: Box<TargetExpr>, rhs: Box<TargetExpr> },
    Arith { op: ArithmeticOperator, lhs: Box<TargetExpr>, rhs: Box<TargetExpr> },
    Array(Vec<TargetExpr>),
    /// Element at index 0.
    Head(Box<TargetExpr>),
    /// Slice from index 1.
    Tail(Box<TargetExpr>),
    Prepend { head: Box<TargetExpr>, tail: Box<TargetExpr> },
    Length(Box<TargetExpr>),
    Concat { lhs: Box<TargetExpr>, rhs: Box<TargetExpr> },
    Slice { list: Box<TargetExpr>, from: Box<TargetExpr>, to: Box<TargetExpr> },
    Tuple(Vec<TargetExpr>),
    Project { tuple: Box<TargetExpr>, index: usize },
}

impl TargetExpr {
    pub fn call(func: TargetExpr, arg: TargetExpr) -> Self {
        TargetExpr::Call { func: Box::new(func), arg: Box::new(arg) }
    }

    pub fn lambda(param: impl Into<String>, body: TargetExpr) -> Self {
        TargetExpr::Lambda { param: param.into(), body: Box::new(body) }
    }

    pub fn ternary(cond: TargetExpr, then: TargetExpr, otherwise: TargetExpr) -> Self {
        TargetExpr::Ternary {
            cond: Box::new(cond),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }

    pub fn is_lambda(&self) -> bool {
        matches!(self, TargetExpr::Lambda { .. })
    }

    /// Parameters of directly nested lambdas starting at this node.
    pub fn lambda_params(&self) -> Vec<&str> {
        let mut out = Vec::new();
        let mut cur = self;
        while let TargetExpr::Lambda { param, body } = cur {
            out.push(param.as_str());
            cur = body;
        }
        out
    }
}

impl std::fmt::Display for TargetExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetExpr::Num(v) => write!(f, "{:?}", v),
            TargetExpr::Const { name, id } => write!(f, "(const {} #{})", name, id),
            TargetExpr::Local(name) => write!(f, "(local {})", name),
            TargetExpr::Global(name) => write!(f, "(global {})", name),
            TargetExpr::Call { func, arg } => write!(f, "(call {} {})", func, arg),
            TargetExpr::Lambda { param, body } => write!(f, "(lambda {} {})", param, body),
            TargetExpr::Ternary { cond, then, otherwise } => {
                write!(f, "(if {} {} {})", cond, then, otherwise)
            }
            TargetExpr::EqInt { lhs, rhs } => write!(f, "(eq {} {})", lhs, rhs),
            TargetExpr::CmpInt { op, lhs, rhs } => write!(f, "({} {} {})", op.symbol(), lhs, rhs),
            TargetExpr::Arith { op, lhs, rhs } => write!(f, "({} {} {})", op.symbol(), lhs, rhs),
            TargetExpr::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            TargetExpr::Tuple(items) => {
                write!(f, "(tuple")?;
                for item in items {
                    write!(f, " {}", item)?;
                }
                write!(f, ")")
            }
            TargetExpr::Head(list) => write!(f, "(head {})", list),
            TargetExpr::Tail(list) => write!(f, "(tail {})", list),
            TargetExpr::Prepend { head, tail } => write!(f, "(prepend {} {})", head, tail),
            TargetExpr::Length(list) => write!(f, "(length {})", list),
            TargetExpr::Concat { lhs, rhs } => write!(f, "(concat {} {})", lhs, rhs),
            TargetExpr::Slice { list, from, to } => write!(f, "(slice {} {} {})", list, from, to),
            TargetExpr::Project { tuple, index } => write!(f, "(get {} {})", tuple, index),
        }
    }
}
