//! file: core/src/vm/value.rs
//! description: runtime values and environments of the reference evaluator.
//!
//! Values borrow code from the `TargetUnit` they run against; closures keep
//! the environment they were created in. Atoms are plain numbers at run
//! time, exactly as in emitted code.

use std::fmt;
use std::rc::Rc;

use crate::target::{TargetExpr, TargetFunction};

use super::VmError;

#[derive(Debug, Clone)]
pub enum Value<'u> {
    Num(f64),
    List(Vec<Value<'u>>),
    Tuple(Vec<Value<'u>>),
    Closure {
        param: &'u str,
        body: &'u TargetExpr,
        env: Env<'u>,
    },
    /// A top-level function declaration used as a value.
    Function(&'u TargetFunction),
}

impl<'u> Value<'u> {
    pub fn num(value: f64) -> Self {
        Value::Num(value)
    }

    pub fn list(items: impl IntoIterator<Item = f64>) -> Self {
        Value::List(items.into_iter().map(Value::Num).collect())
    }

    pub fn truth(flag: bool) -> Self {
        Value::Num(if flag { 1.0 } else { 0.0 })
    }

    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Num(_) => "number",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Closure { .. } => "closure",
            Value::Function(_) => "function",
        }
    }

    /// Structural equality. Functions are only equal to themselves and
    /// closures are never equal to anything.
    pub fn structurally_equal(&self, other: &Value<'u>) -> bool {
        match (self, other) {
            (Value::Num(a), Value::Num(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.structurally_equal(y))
            }
            (Value::Function(a), Value::Function(b)) => std::ptr::eq(*a, *b),
            _ => false,
        }
    }

    /// Convert a JSON argument. Booleans become 0/1.
    pub fn from_json(json: &serde_json::Value) -> Result<Value<'u>, VmError> {
        match json {
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(Value::Num)
                .ok_or_else(|| VmError::Json(format!("number {} is out of range", n))),
            serde_json::Value::Bool(b) => Ok(Value::truth(*b)),
            serde_json::Value::Array(items) => items
                .iter()
                .map(Value::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            other => Err(VmError::Json(format!("cannot pass `{}` as an argument", other))),
        }
    }

    /// Lists and tuples both become JSON arrays.
    pub fn to_json(&self) -> Result<serde_json::Value, VmError> {
        match self {
            Value::Num(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .ok_or_else(|| VmError::Json(format!("{} has no JSON representation", n))),
            Value::List(items) | Value::Tuple(items) => items
                .iter()
                .map(Value::to_json)
                .collect::<Result<Vec<_>, _>>()
                .map(serde_json::Value::Array),
            other => Err(VmError::Json(format!("a {} has no JSON representation", other.kind_name()))),
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Num(n) => write!(f, "{:?}", n),
            Value::List(items) => write_items(f, "[", items, "]"),
            Value::Tuple(items) => write_items(f, "(", items, ")"),
            Value::Closure { param, .. } => write!(f, "<closure {}>", param),
            Value::Function(func) => write!(f, "<function {}>", func.name),
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, open: &str, items: &[Value<'_>], close: &str) -> fmt::Result {
    write!(f, "{}", open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "{}", close)
}

#[derive(Debug)]
struct Binding<'u> {
    name: &'u str,
    value: Value<'u>,
    parent: Env<'u>,
}

/// Persistent linked environment; cloning shares the tail.
#[derive(Debug, Clone, Default)]
pub struct Env<'u>(Option<Rc<Binding<'u>>>);

impl<'u> Env<'u> {
    pub fn empty() -> Self {
        Env(None)
    }

    pub fn bind(&self, name: &'u str, value: Value<'u>) -> Self {
        Env(Some(Rc::new(Binding { name, value, parent: self.clone() })))
    }

    pub fn lookup(&self, name: &str) -> Option<&Value<'u>> {
        let mut cur = self.0.as_deref();
        while let Some(binding) = cur {
            if binding.name == name {
                return Some(&binding.value);
            }
            cur = binding.parent.0.as_deref();
        }
        None
    }
}
