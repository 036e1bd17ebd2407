//! Typed functional IR consumed by the backend.

pub mod decl;
pub mod expr;
pub mod program;
pub mod signature;
pub mod types;

pub use decl::Declaration;
pub use expr::{ArithmeticOperator, ComparisonOperator, Expr, NodeId};
pub use program::{Program, ProgramError};
pub use signature::{parse_signature, SignatureError};
pub use types::Type;
