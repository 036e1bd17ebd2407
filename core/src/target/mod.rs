//! Lowered, target-neutral representation of a compilation unit.

pub mod expr;
pub mod module;

pub use expr::TargetExpr;
pub use module::{TargetFunction, TargetUnit};
