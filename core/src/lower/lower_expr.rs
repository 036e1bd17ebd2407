//! file: core/src/lower/lower_expr.rs
//! description: IR expression to target expression lowering.
//!
//! Lowering is bottom-up and structural: every IR node maps to one target
//! node. `bound_vars` holds the closure parameters in scope, innermost
//! last; names not found there fall back to top-level declarations.

use crate::error::{BackendError, BackendErrorKind};
use crate::ir::Expr;
use crate::target::TargetExpr;

use super::lowering_context::LoweringContext;

/// Lower `expr` with `bound_vars` in scope.
pub fn lower(expr: &Expr, bound_vars: &[String], ctx: &mut LoweringContext<'_>) -> Result<TargetExpr, BackendError> {
    let mut scope = bound_vars.to_vec();
    lower_expr(expr, &mut scope, ctx)
}

pub(crate) fn lower_expr(
    expr: &Expr,
    bound_vars: &mut Vec<String>,
    ctx: &mut LoweringContext<'_>,
) -> Result<TargetExpr, BackendError> {
    let node = ctx.next_node();
    let lowered = match expr {
        Expr::AtomRef { name } => ctx.resolve_atom(name, node)?,
        Expr::NumLiteral { value } => TargetExpr::Num(*value),
        Expr::Variable { name } => {
            if bound_vars.iter().rev().any(|v| v == name) {
                TargetExpr::Local(name.clone())
            } else if ctx.is_global(name) {
                TargetExpr::Global(name.clone())
            } else {
                return Err(ctx.error(BackendErrorKind::UnboundVariable(name.clone()), node));
            }
        }
        Expr::Application { func, arg } => {
            let func = lower_expr(func, bound_vars, ctx)?;
            let arg = lower_expr(arg, bound_vars, ctx)?;
            TargetExpr::call(func, arg)
        }
        Expr::Conditional { cond, then, otherwise } => {
            let cond = lower_expr(cond, bound_vars, ctx)?;
            let then = lower_expr(then, bound_vars, ctx)?;
            let otherwise = lower_expr(otherwise, bound_vars, ctx)?;
            TargetExpr::ternary(cond, then, otherwise)
        }
        Expr::EqualityTest { lhs, rhs } => TargetExpr::EqInt {
            lhs: Box::new(lower_expr(lhs, bound_vars, ctx)?),
            rhs: Box::new(lower_expr(rhs, bound_vars, ctx)?),
        },
        Expr::Comparison { op, lhs, rhs } => TargetExpr::CmpInt {
            op: *op,
            lhs: Box::new(lower_expr(lhs, bound_vars, ctx)?),
            rhs: Box::new(lower_expr(rhs, bound_vars, ctx)?),
        },
        Expr::Arithmetic { op, lhs, rhs } => TargetExpr::Arith {
            op: *op,
            lhs: Box::new(lower_expr(lhs, bound_vars, ctx)?),
            rhs: Box::new(lower_expr(rhs, bound_vars, ctx)?),
        },
        Expr::ListLiteral { elements } => {
            let mut items = Vec::with_capacity(elements.len());
            for element in elements {
                items.push(lower_expr(element, bound_vars, ctx)?);
            }
            TargetExpr::Array(items)
        }
        Expr::ListCons { head, tail } => TargetExpr::Prepend {
            head: Box::new(lower_expr(head, bound_vars, ctx)?),
            tail: Box::new(lower_expr(tail, bound_vars, ctx)?),
        },
        Expr::ListHead { list } => TargetExpr::Head(Box::new(lower_expr(list, bound_vars, ctx)?)),
        Expr::ListTail { list } => TargetExpr::Tail(Box::new(lower_expr(list, bound_vars, ctx)?)),
        Expr::ListLength { list } => TargetExpr::Length(Box::new(lower_expr(list, bound_vars, ctx)?)),
        Expr::ListConcat { lhs, rhs } => TargetExpr::Concat {
            lhs: Box::new(lower_expr(lhs, bound_vars, ctx)?),
            rhs: Box::new(lower_expr(rhs, bound_vars, ctx)?),
        },
        Expr::ListSlice { list, from, to } => TargetExpr::Slice {
            list: Box::new(lower_expr(list, bound_vars, ctx)?),
            from: Box::new(lower_expr(from, bound_vars, ctx)?),
            to: Box::new(lower_expr(to, bound_vars, ctx)?),
        },
        Expr::TupleLiteral { elements } => {
            let mut items = Vec::with_capacity(elements.len());
            for element in elements {
                items.push(lower_expr(element, bound_vars, ctx)?);
            }
            TargetExpr::Tuple(items)
        }
        Expr::TupleGet { tuple, index } => TargetExpr::Project {
            tuple: Box::new(lower_expr(tuple, bound_vars, ctx)?),
            index: *index,
        },
        Expr::Closure { param, body } => {
            bound_vars.push(param.clone());
            let body = lower_expr(body, bound_vars, ctx);
            bound_vars.pop();
            TargetExpr::lambda(param.clone(), body?)
        }
    };
    log::trace!("{}: node #{} {} lowered", ctx.declaration(), node, expr.kind_name());
    Ok(lowered)
}
