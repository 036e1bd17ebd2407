//! Reference evaluator for lowered units.
//!
//! `VM` runs a `TargetUnit` directly, with the value semantics the emitted
//! code has in its target runtime. It backs the `run` command and lets
//! tests check behaviour without a Python or JavaScript interpreter.

mod exec;
pub mod value;

use std::collections::HashMap;

use thiserror::Error;

use crate::error::{Level, QuillErrorExt};
use crate::location::Location;
use crate::target::TargetUnit;

pub use value::{Env, Value};

/// Curried applications allowed in flight. Each level costs two or three
/// native frames; the stack grows on demand so this is the only limit.
pub const DEFAULT_MAX_DEPTH: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VmError {
    #[error("unbound name `{0}`")]
    Unbound(String),
    #[error("`{0}` is not a function")]
    NotAFunction(String),
    #[error("{op} expects a {expected}, found a {found}")]
    TypeMismatch {
        op: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{0} of an empty list")]
    EmptyList(&'static str),
    #[error("division by zero")]
    DivisionByZero,
    #[error("slice bound {0} is not a finite number")]
    InvalidSliceBound(String),
    #[error("component {index} of a {len}-tuple")]
    TupleIndex { index: usize, len: usize },
    #[error("call depth exceeded {0}")]
    StackOverflow(usize),
    #[error("value `{0}` is used before it is initialised")]
    Uninitialised(String),
    #[error("{0}")]
    Json(String),
}

impl QuillErrorExt for VmError {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        self.to_string()
    }

    fn issuer(&self) -> String {
        "quill.vm".to_string()
    }

    fn location(&self) -> Option<Location> {
        None
    }
}

pub struct VM<'u> {
    unit: &'u TargetUnit,
    values: HashMap<&'u str, Value<'u>>,
    max_depth: usize,
}

impl<'u> VM<'u> {
    /// Load `unit` and evaluate its value declarations in source order.
    pub fn new(unit: &'u TargetUnit) -> Result<Self, VmError> {
        VM::with_max_depth(unit, DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(unit: &'u TargetUnit, max_depth: usize) -> Result<Self, VmError> {
        let mut vm = VM {
            unit,
            values: HashMap::new(),
            max_depth,
        };
        for decl in unit.values() {
            let value = vm.eval_in(&decl.body, &Env::empty(), 0)?;
            log::trace!("value `{}` = {}", decl.name, value);
            vm.values.insert(decl.name.as_str(), value);
        }
        Ok(vm)
    }

    /// Resolve a top-level name: a function or an evaluated value.
    pub fn global(&self, name: &str) -> Result<Value<'u>, VmError> {
        let decl = self
            .unit
            .function(name)
            .ok_or_else(|| VmError::Unbound(name.to_string()))?;
        if decl.is_value() {
            self.values
                .get(name)
                .cloned()
                .ok_or_else(|| VmError::Uninitialised(name.to_string()))
        } else {
            Ok(Value::Function(decl))
        }
    }

    /// Apply `func` to one argument.
    pub fn apply(&self, func: &Value<'u>, arg: Value<'u>) -> Result<Value<'u>, VmError> {
        self.apply_at(func, arg, 1)
    }

    /// Call a declaration with `args`, one curried application at a time.
    /// With no arguments this is just the declaration's value.
    pub fn call(&self, name: &str, args: Vec<Value<'u>>) -> Result<Value<'u>, VmError> {
        log::debug!("call `{}` with {} argument(s)", name, args.len());
        let mut current = self.global(name)?;
        for arg in args {
            current = self.apply(&current, arg)?;
        }
        Ok(current)
    }
}
