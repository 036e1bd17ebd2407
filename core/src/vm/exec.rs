//! file: core/src/vm/exec.rs
//! description: tree-walking evaluation of target expressions.
//!
//! Semantics follow the emitted code: comparisons and equality yield 0/1,
//! a conditional takes its `then` arm on any nonzero number, head and tail
//! fail on an empty list and division by zero is an error. Slices follow
//! `Array.prototype.slice` on truncated bounds.
//!
//! Evaluation recurses on the native stack. `eval_in` grows it on the heap
//! through `stacker` whenever less than `RED_ZONE` is left, so a program
//! only ever stops at the evaluator's own depth limit.

use crate::ir::{ArithmeticOperator, ComparisonOperator};
use crate::target::{TargetExpr, TargetFunction};

use super::value::{Env, Value};
use super::{VmError, VM};

fn expect_num<'u>(op: &'static str, value: Value<'u>) -> Result<f64, VmError> {
    match value {
        Value::Num(n) => Ok(n),
        other => Err(VmError::TypeMismatch { op, expected: "number", found: other.kind_name() }),
    }
}

fn expect_list<'u>(op: &'static str, value: Value<'u>) -> Result<Vec<Value<'u>>, VmError> {
    match value {
        Value::List(items) => Ok(items),
        other => Err(VmError::TypeMismatch { op, expected: "list", found: other.kind_name() }),
    }
}

fn expect_tuple<'u>(value: Value<'u>) -> Result<Vec<Value<'u>>, VmError> {
    match value {
        Value::Tuple(items) => Ok(items),
        other => Err(VmError::TypeMismatch { op: "projection", expected: "tuple", found: other.kind_name() }),
    }
}

const RED_ZONE: usize = 128 * 1024;
const STACK_SEGMENT: usize = 4 * 1024 * 1024;

/// Clamp a slice bound into `0..=len`; negative bounds count from the end.
fn slice_bound(bound: f64, len: usize) -> Result<usize, VmError> {
    if !bound.is_finite() {
        return Err(VmError::InvalidSliceBound(format!("{:?}", bound)));
    }
    let bound = bound.trunc();
    let len_f = len as f64;
    let index = if bound < 0.0 { (len_f + bound).max(0.0) } else { bound.min(len_f) };
    Ok(index as usize)
}

fn arith(op: ArithmeticOperator, a: f64, b: f64) -> Result<f64, VmError> {
    match op {
        ArithmeticOperator::Add => Ok(a + b),
        ArithmeticOperator::Sub => Ok(a - b),
        ArithmeticOperator::Mul => Ok(a * b),
        ArithmeticOperator::Div if b == 0.0 => Err(VmError::DivisionByZero),
        ArithmeticOperator::Div => Ok(a / b),
    }
}

fn compare(op: ComparisonOperator, a: f64, b: f64) -> bool {
    match op {
        ComparisonOperator::Lt => a < b,
        ComparisonOperator::Le => a <= b,
    }
}

impl<'u> VM<'u> {
    pub(crate) fn eval_in(&self, expr: &'u TargetExpr, env: &Env<'u>, depth: usize) -> Result<Value<'u>, VmError> {
        stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, || self.eval_node(expr, env, depth))
    }

    fn eval_node(&self, expr: &'u TargetExpr, env: &Env<'u>, depth: usize) -> Result<Value<'u>, VmError> {
        match expr {
            TargetExpr::Num(n) => Ok(Value::Num(*n)),
            TargetExpr::Const { id, .. } => Ok(Value::Num(f64::from(*id))),
            TargetExpr::Local(name) => env
                .lookup(name)
                .cloned()
                .ok_or_else(|| VmError::Unbound(name.clone())),
            TargetExpr::Global(name) => self.global(name),
            TargetExpr::Call { func, arg } => {
                let func = self.eval_in(func, env, depth)?;
                let arg = self.eval_in(arg, env, depth)?;
                self.apply_at(&func, arg, depth + 1)
            }
            TargetExpr::Lambda { param, body } => Ok(Value::Closure {
                param: param.as_str(),
                body: body.as_ref(),
                env: env.clone(),
            }),
            TargetExpr::Ternary { cond, then, otherwise } => {
                let cond = expect_num("conditional", self.eval_in(cond, env, depth)?)?;
                if cond != 0.0 {
                    self.eval_in(then, env, depth)
                } else {
                    self.eval_in(otherwise, env, depth)
                }
            }
            TargetExpr::EqInt { lhs, rhs } => {
                let lhs = self.eval_in(lhs, env, depth)?;
                let rhs = self.eval_in(rhs, env, depth)?;
                Ok(Value::truth(lhs.structurally_equal(&rhs)))
            }
            TargetExpr::CmpInt { op, lhs, rhs } => {
                let lhs = expect_num(op.symbol(), self.eval_in(lhs, env, depth)?)?;
                let rhs = expect_num(op.symbol(), self.eval_in(rhs, env, depth)?)?;
                Ok(Value::truth(compare(*op, lhs, rhs)))
            }
            TargetExpr::Arith { op, lhs, rhs } => {
                let lhs = expect_num(op.symbol(), self.eval_in(lhs, env, depth)?)?;
                let rhs = expect_num(op.symbol(), self.eval_in(rhs, env, depth)?)?;
                arith(*op, lhs, rhs).map(Value::Num)
            }
            TargetExpr::Array(items) => items
                .iter()
                .map(|item| self.eval_in(item, env, depth))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            TargetExpr::Head(list) => {
                let items = expect_list("head", self.eval_in(list, env, depth)?)?;
                items.into_iter().next().ok_or(VmError::EmptyList("head"))
            }
            TargetExpr::Tail(list) => {
                let mut items = expect_list("tail", self.eval_in(list, env, depth)?)?;
                if items.is_empty() {
                    return Err(VmError::EmptyList("tail"));
                }
                items.remove(0);
                Ok(Value::List(items))
            }
            TargetExpr::Prepend { head, tail } => {
                let head = self.eval_in(head, env, depth)?;
                let tail = expect_list("prepend", self.eval_in(tail, env, depth)?)?;
                let mut items = Vec::with_capacity(tail.len() + 1);
                items.push(head);
                items.extend(tail);
                Ok(Value::List(items))
            }
            TargetExpr::Length(list) => {
                let items = expect_list("length", self.eval_in(list, env, depth)?)?;
                Ok(Value::Num(items.len() as f64))
            }
            TargetExpr::Concat { lhs, rhs } => {
                let mut items = expect_list("concat", self.eval_in(lhs, env, depth)?)?;
                items.extend(expect_list("concat", self.eval_in(rhs, env, depth)?)?);
                Ok(Value::List(items))
            }
            TargetExpr::Slice { list, from, to } => {
                let items = expect_list("slice", self.eval_in(list, env, depth)?)?;
                let from = slice_bound(expect_num("slice", self.eval_in(from, env, depth)?)?, items.len())?;
                let to = slice_bound(expect_num("slice", self.eval_in(to, env, depth)?)?, items.len())?;
                if from >= to {
                    return Ok(Value::List(Vec::new()));
                }
                Ok(Value::List(items.into_iter().skip(from).take(to - from).collect()))
            }
            TargetExpr::Tuple(items) => items
                .iter()
                .map(|item| self.eval_in(item, env, depth))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Tuple),
            TargetExpr::Project { tuple, index } => {
                let items = expect_tuple(self.eval_in(tuple, env, depth)?)?;
                let len = items.len();
                items
                    .into_iter()
                    .nth(*index)
                    .ok_or(VmError::TupleIndex { index: *index, len })
            }
        }
    }

    pub(crate) fn apply_at(&self, func: &Value<'u>, arg: Value<'u>, depth: usize) -> Result<Value<'u>, VmError> {
        if depth > self.max_depth {
            return Err(VmError::StackOverflow(self.max_depth));
        }
        match func {
            Value::Closure { param, body, env } => self.eval_in(*body, &env.bind(*param, arg), depth),
            Value::Function(decl) => {
                let decl: &'u TargetFunction = *decl;
                match &decl.param {
                    Some(param) => self.eval_in(&decl.body, &Env::empty().bind(param.as_str(), arg), depth),
                    None => Err(VmError::NotAFunction(decl.name.clone())),
                }
            }
            other => Err(VmError::NotAFunction(other.to_string())),
        }
    }
}
