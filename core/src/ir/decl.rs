use serde::{Deserialize, Serialize};

use crate::location::Location;

use super::expr::Expr;
use super::types::Type;

/// A top-level named declaration: signature plus body.
///
/// The body of a declaration with signature arity `n` starts with `n` nested
/// closure introductions. Arity 0 makes it a value declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub signature: Type,
    pub body: Expr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, signature: Type, body: Expr) -> Self {
        Declaration {
            name: name.into(),
            signature,
            body,
            location: None,
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn arity(&self) -> usize {
        self.signature.arity()
    }

    pub fn is_value(&self) -> bool {
        self.arity() == 0
    }
}
