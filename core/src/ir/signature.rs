//! file: core/src/ir/signature.rs
//! description: pest reader for type signature strings.
//!
//! Accepts the same notation the emitter renders (`(Num -> ([Num] -> Num))`)
//! as well as the unparenthesized form, with `->` associating to the right.
//! A bracket holding one type is a list, two or more make a tuple
//! (`[[Num] [Num]]`). The grammar lives in `signature.pest`.

use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;
use thiserror::Error;

use crate::error::{Level, QuillErrorExt};
use crate::location::Location;

use super::types::Type;

#[derive(Parser)]
#[grammar = "ir/signature.pest"]
struct SignatureParser;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid signature `{input}`: {message}")]
pub struct SignatureError {
    input: String,
    message: String,
}

impl SignatureError {
    fn new(input: &str, message: impl Into<String>) -> Self {
        SignatureError {
            input: input.to_string(),
            message: message.into(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

impl QuillErrorExt for SignatureError {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        self.to_string()
    }

    fn issuer(&self) -> String {
        "quill.ir.signature".to_string()
    }

    fn location(&self) -> Option<Location> {
        None
    }
}

pub fn parse_signature(input: &str) -> Result<Type, SignatureError> {
    let mut pairs = SignatureParser::parse(Rule::signature, input)
        .map_err(|e| SignatureError::new(input, e.variant.message().into_owned()))?;
    let ty = pairs
        .next()
        .and_then(|signature| signature.into_inner().next())
        .ok_or_else(|| SignatureError::new(input, "empty signature"))?;
    build_type(input, ty)
}

fn build_type(input: &str, pair: Pair<'_, Rule>) -> Result<Type, SignatureError> {
    match pair.as_rule() {
        Rule::ty => {
            let mut inner = pair.into_inner();
            let head = inner
                .next()
                .ok_or_else(|| SignatureError::new(input, "missing operand"))?;
            let param = build_type(input, head)?;
            match inner.next() {
                Some(rest) => Ok(Type::func(param, build_type(input, rest)?)),
                None => Ok(param),
            }
        }
        Rule::num => Ok(Type::Num),
        Rule::atom => Ok(Type::Atom),
        Rule::var => Ok(Type::Var(pair.as_str().to_string())),
        Rule::list => {
            let elem = pair
                .into_inner()
                .next()
                .ok_or_else(|| SignatureError::new(input, "missing list element type"))?;
            Ok(Type::list(build_type(input, elem)?))
        }
        Rule::tuple => pair
            .into_inner()
            .map(|elem| build_type(input, elem))
            .collect::<Result<Vec<_>, _>>()
            .map(Type::Tuple),
        other => Err(SignatureError::new(input, format!("unexpected {:?}", other))),
    }
}
