use crate::ir::Type;
use crate::registry::AtomId;

use super::expr::TargetExpr;

/// One lowered top-level declaration.
///
/// `param` is the first curried parameter; any further curry levels are
/// nested `TargetExpr::Lambda` nodes at the root of `body`. A `None` param
/// marks a value binding (arity 0).
#[derive(Debug, Clone, PartialEq)]
pub struct TargetFunction {
    pub name: String,
    pub signature: Type,
    pub param: Option<String>,
    pub body: TargetExpr,
}

impl TargetFunction {
    pub fn is_value(&self) -> bool {
        self.param.is_none()
    }

    /// Total curried arity: the named parameter plus nested lambdas.
    pub fn arity(&self) -> usize {
        match self.param {
            Some(_) => 1 + self.body.lambda_params().len(),
            None => 0,
        }
    }
}

/// A fully lowered compilation unit, ready for an emitter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetUnit {
    /// Declarations in source order, functions and values alike.
    pub functions: Vec<TargetFunction>,
    /// Atom table snapshot in registration order.
    pub atoms: Vec<(String, AtomId)>,
    pub pipelines: Vec<String>,
}

impl TargetUnit {
    pub fn function(&self, name: &str) -> Option<&TargetFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &TargetFunction> {
        self.functions.iter().filter(|f| !f.is_value())
    }

    pub fn values(&self) -> impl Iterator<Item = &TargetFunction> {
        self.functions.iter().filter(|f| f.is_value())
    }
}

impl std::fmt::Display for TargetUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, func) in self.functions.iter().enumerate() {
            match &func.param {
                Some(param) => writeln!(f, "{:04}: fn {}({}) : {} = {}", i, func.name, param, func.signature, func.body)?,
                None => writeln!(f, "{:04}: val {} : {} = {}", i, func.name, func.signature, func.body)?,
            }
        }
        for (name, id) in &self.atoms {
            writeln!(f, "atom {} = {}", name, id)?;
        }
        writeln!(f, "pipeline [{}]", self.pipelines.join(", "))
    }
}
