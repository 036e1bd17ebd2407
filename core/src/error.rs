//! file: core/src/error.rs
//! description: diagnostic levels, the reporting trait and backend errors.
//!
//! Every error surfaced by the crate implements `QuillErrorExt` so the CLI
//! can render them uniformly. `BackendError` covers the internal-invariant
//! violations raised while lowering or emitting a compilation unit.

use std::fmt;

use thiserror::Error;

use crate::ir::NodeId;
use crate::location::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level_str = match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        };
        write!(f, "{}", level_str)
    }
}

pub trait QuillErrorExt {
    fn level(&self) -> Level;
    fn message(&self) -> String;
    fn issuer(&self) -> String;
    fn location(&self) -> Option<Location>;
}

impl fmt::Debug for dyn QuillErrorExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loc_str = match self.location() {
            Some(loc) => loc.to_string(),
            None => "unknown".to_string(),
        };

        write!(
            f,
            "QUILL | {} | {} | {} | {}",
            self.level(),
            loc_str,
            self.issuer(),
            self.message()
        )
    }
}

impl fmt::Display for dyn QuillErrorExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// What went wrong while lowering or emitting a declaration.
///
/// These all point at a front-end bug: a well-typed IR never triggers them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendErrorKind {
    #[error("unbound variable `{0}`")]
    UnboundVariable(String),
    #[error("signature declares {expected} curried parameter(s) but the body introduces {found}")]
    ArityMismatch { expected: usize, found: usize },
    #[error("unknown atom `{0}`")]
    UnknownAtom(String),
    #[error("declaration `{0}` is defined more than once")]
    DuplicateDeclaration(String),
    #[error("pipeline stage `{0}` does not name a declaration")]
    UnknownPipelineStage(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendError {
    kind: BackendErrorKind,
    declaration: String,
    node: Option<NodeId>,
    location: Option<Location>,
}

impl BackendError {
    pub fn new(kind: BackendErrorKind, declaration: impl Into<String>) -> Self {
        BackendError {
            kind,
            declaration: declaration.into(),
            node: None,
            location: None,
        }
    }

    pub fn with_node(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }

    pub fn with_location(mut self, location: Option<Location>) -> Self {
        self.location = location;
        self
    }

    pub fn kind(&self) -> &BackendErrorKind {
        &self.kind
    }

    /// Name of the declaration whose emission was aborted.
    pub fn declaration(&self) -> &str {
        &self.declaration
    }

    /// Pre-order number of the offending node inside the declaration body.
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in declaration `{}`", self.kind, self.declaration)?;
        if let Some(node) = self.node {
            write!(f, " at node #{}", node)?;
        }
        Ok(())
    }
}

impl std::error::Error for BackendError {}

impl QuillErrorExt for BackendError {
    fn level(&self) -> Level {
        Level::Critical
    }

    fn message(&self) -> String {
        self.to_string()
    }

    fn issuer(&self) -> String {
        match self.kind {
            BackendErrorKind::UnknownPipelineStage(_) => "quill.registry".to_string(),
            _ => "quill.lower".to_string(),
        }
    }

    fn location(&self) -> Option<Location> {
        self.location.clone()
    }
}
