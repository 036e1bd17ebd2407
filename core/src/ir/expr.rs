//! file: core/src/ir/expr.rs
//! description: expression nodes of the typed functional IR.
//!
//! Each node owns its children exclusively; the IR is a finite tree. The
//! constructors below mirror the node set one-to-one and are what tests and
//! front-ends use to build bodies without spelling out the boxes.

use serde::{Deserialize, Serialize};

/// Pre-order number of a node within one declaration body (root = 0).
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithmeticOperator {
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /
}

impl ArithmeticOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            ArithmeticOperator::Add => "+",
            ArithmeticOperator::Sub => "-",
            ArithmeticOperator::Mul => "*",
            ArithmeticOperator::Div => "/",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    Lt, // <
    Le, // <=
}

impl ComparisonOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOperator::Lt => "<",
            ComparisonOperator::Le => "<=",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Expr {
    AtomRef { name: String },
    NumLiteral { value: f64 },
    Variable { name: String },
    Application { func: Box<Expr>, arg: Box<Expr> },
    Conditional { cond: Box<Expr>, then: Box<Expr>, otherwise: Box<Expr> },
    EqualityTest { lhs: Box<Expr>, rhs: Box<Expr> },
    Comparison { op: ComparisonOperator, lhs: Box<Expr>, rhs: Box<Expr> },
    Arithmetic { op: ArithmeticOperator, lhs: Box<Expr>, rhs: Box<Expr> },
    ListLiteral { elements: Vec<Expr> },
    ListCons { head: Box<Expr>, tail: Box<Expr> },
    ListHead { list: Box<Expr> },
    ListTail { list: Box<Expr> },
    ListLength { list: Box<Expr> },
    ListConcat { lhs: Box<Expr>, rhs: Box<Expr> },
    /// Elements `from` (inclusive) to `to` (exclusive). Bounds are truncated
    /// toward zero, negative bounds count from the end.
    ListSlice { list: Box<Expr>, from: Box<Expr>, to: Box<Expr> },
    TupleLiteral { elements: Vec<Expr> },
    /// Zero-based component projection.
    TupleGet { tuple: Box<Expr>, index: usize },
    /// Closure introduction: a single-parameter anonymous function.
    Closure { param: String, body: Box<Expr> },
}

impl Expr {
    pub fn atom(name: impl Into<String>) -> Self {
        Expr::AtomRef { name: name.into() }
    }

    pub fn num(value: f64) -> Self {
        Expr::NumLiteral { value }
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable { name: name.into() }
    }

    pub fn apply(func: Expr, arg: Expr) -> Self {
        Expr::Application { func: Box::new(func), arg: Box::new(arg) }
    }

    /// `f a b c` as `((f a) b) c`.
    pub fn apply_all(func: Expr, args: impl IntoIterator<Item = Expr>) -> Self {
        args.into_iter().fold(func, Expr::apply)
    }

    pub fn cond(cond: Expr, then: Expr, otherwise: Expr) -> Self {
        Expr::Conditional {
            cond: Box::new(cond),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }

    pub fn eq(lhs: Expr, rhs: Expr) -> Self {
        Expr::EqualityTest { lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    pub fn compare(op: ComparisonOperator, lhs: Expr, rhs: Expr) -> Self {
        Expr::Comparison { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    pub fn arith(op: ArithmeticOperator, lhs: Expr, rhs: Expr) -> Self {
        Expr::Arithmetic { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    pub fn list(elements: Vec<Expr>) -> Self {
        Expr::ListLiteral { elements }
    }

    pub fn empty_list() -> Self {
        Expr::ListLiteral { elements: Vec::new() }
    }

    pub fn cons(head: Expr, tail: Expr) -> Self {
        Expr::ListCons { head: Box::new(head), tail: Box::new(tail) }
    }

    pub fn head(list: Expr) -> Self {
        Expr::ListHead { list: Box::new(list) }
    }

    pub fn tail(list: Expr) -> Self {
        Expr::ListTail { list: Box::new(list) }
    }

    pub fn length(list: Expr) -> Self {
        Expr::ListLength { list: Box::new(list) }
    }

    pub fn concat(lhs: Expr, rhs: Expr) -> Self {
        Expr::ListConcat { lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    pub fn slice(list: Expr, from: Expr, to: Expr) -> Self {
        Expr::ListSlice { list: Box::new(list), from: Box::new(from), to: Box::new(to) }
    }

    pub fn tuple(elements: Vec<Expr>) -> Self {
        Expr::TupleLiteral { elements }
    }

    pub fn get(tuple: Expr, index: usize) -> Self {
        Expr::TupleGet { tuple: Box::new(tuple), index }
    }

    pub fn first(tuple: Expr) -> Self {
        Expr::get(tuple, 0)
    }

    pub fn second(tuple: Expr) -> Self {
        Expr::get(tuple, 1)
    }

    pub fn closure(param: impl Into<String>, body: Expr) -> Self {
        Expr::Closure { param: param.into(), body: Box::new(body) }
    }

    /// Nest one closure per parameter, outermost first.
    pub fn closures<S: Into<String>>(params: impl IntoIterator<Item = S>, body: Expr) -> Self {
        let params: Vec<String> = params.into_iter().map(Into::into).collect();
        params
            .into_iter()
            .rev()
            .fold(body, |acc, param| Expr::closure(param, acc))
    }

    /// Number of directly nested closure introductions starting at this node.
    pub fn leading_closures(&self) -> usize {
        let mut count = 0;
        let mut cur = self;
        while let Expr::Closure { body, .. } = cur {
            count += 1;
            cur = body;
        }
        count
    }

    /// Short tag used in logs and diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::AtomRef { .. } => "atom_ref",
            Expr::NumLiteral { .. } => "num_literal",
            Expr::Variable { .. } => "variable",
            Expr::Application { .. } => "application",
            Expr::Conditional { .. } => "conditional",
            Expr::EqualityTest { .. } => "equality_test",
            Expr::Comparison { .. } => "comparison",
            Expr::Arithmetic { .. } => "arithmetic",
            Expr::ListLiteral { .. } => "list_literal",
            Expr::ListCons { .. } => "list_cons",
            Expr::ListHead { .. } => "list_head",
            Expr::ListTail { .. } => "list_tail",
            Expr::ListLength { .. } => "list_length",
            Expr::ListConcat { .. } => "list_concat",
            Expr::ListSlice { .. } => "list_slice",
            Expr::TupleLiteral { .. } => "tuple_literal",
            Expr::TupleGet { .. } => "tuple_get",
            Expr::Closure { .. } => "closure",
        }
    }
}
