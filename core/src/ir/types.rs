//! file: core/src/ir/types.rs
//! description: type signatures attached to declarations.
//!
//! The backend never checks types. A `Type` is carried through lowering and
//! rendered as the signature annotation in front of each emitted definition.
//! In IR documents signatures are written as strings and parsed by
//! `signature::parse_signature`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::signature::{parse_signature, SignatureError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Type {
    Num,
    Atom,
    /// Type variable of a polymorphic signature (`a`, `b`, ...).
    Var(String),
    List(Box<Type>),
    /// Fixed-size product, written `[A B]`.
    Tuple(Vec<Type>),
    Fn(Box<Type>, Box<Type>),
}

impl Type {
    pub fn list(elem: Type) -> Self {
        Type::List(Box::new(elem))
    }

    pub fn tuple(elems: impl IntoIterator<Item = Type>) -> Self {
        Type::Tuple(elems.into_iter().collect())
    }

    pub fn func(param: Type, result: Type) -> Self {
        Type::Fn(Box::new(param), Box::new(result))
    }

    /// Build `p1 -> (p2 -> (... -> result))`.
    pub fn curried(params: impl IntoIterator<Item = Type>, result: Type) -> Self {
        let params: Vec<Type> = params.into_iter().collect();
        params
            .into_iter()
            .rev()
            .fold(result, |acc, param| Type::func(param, acc))
    }

    /// Number of curried parameters along the right spine of the arrow chain.
    pub fn arity(&self) -> usize {
        match self {
            Type::Fn(_, result) => 1 + result.arity(),
            _ => 0,
        }
    }

    pub fn params(&self) -> Vec<&Type> {
        let mut out = Vec::new();
        let mut cur = self;
        while let Type::Fn(param, result) = cur {
            out.push(param.as_ref());
            cur = result;
        }
        out
    }

    /// Final result type once every curried parameter has been applied.
    pub fn result(&self) -> &Type {
        match self {
            Type::Fn(_, result) => result.result(),
            other => other,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Num => write!(f, "Num"),
            Type::Atom => write!(f, "Atom"),
            Type::Var(name) => write!(f, "{}", name),
            Type::List(elem) => write!(f, "[{}]", elem),
            Type::Tuple(elems) => {
                write!(f, "[")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", elem)?;
                }
                write!(f, "]")
            }
            Type::Fn(param, result) => write!(f, "({} -> {})", param, result),
        }
    }
}

impl FromStr for Type {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_signature(s)
    }
}

impl TryFrom<String> for Type {
    type Error = SignatureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_signature(&value)
    }
}

impl From<Type> for String {
    fn from(ty: Type) -> Self {
        ty.to_string()
    }
}
