//! file: core/src/ir/program.rs
//! description: a compilation unit as handed over by the front-end.
//!
//! Programs are exchanged as JSON documents: the atom names the front-end
//! resolved, in declaration order, followed by the declarations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{Level, QuillErrorExt};
use crate::location::Location;

use super::decl::Declaration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub atoms: Vec<String>,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    pub fn with_atoms<S: Into<String>>(mut self, atoms: impl IntoIterator<Item = S>) -> Self {
        self.atoms.extend(atoms.into_iter().map(Into::into));
        self
    }

    pub fn with_declaration(mut self, decl: Declaration) -> Self {
        self.declarations.push(decl);
        self
    }

    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name == name)
    }

    pub fn from_json_str(raw: &str) -> Result<Program, ProgramError> {
        serde_json::from_str(raw).map_err(|source| ProgramError::Parse { path: None, source })
    }

    /// Load a program document from a JSON file path.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Program, ProgramError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ProgramError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ProgramError::Parse {
            path: Some(path.to_path_buf()),
            source,
        })
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("cannot read program {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed program{}: {source}", path.as_ref().map(|p| format!(" {}", p.display())).unwrap_or_default())]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },
}

impl QuillErrorExt for ProgramError {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        self.to_string()
    }

    fn issuer(&self) -> String {
        "quill.ir.program".to_string()
    }

    fn location(&self) -> Option<Location> {
        match self {
            ProgramError::Parse { path, source } => Some(Location::new(
                path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "<input>".to_string()),
                source.line(),
                source.column(),
            )),
            ProgramError::Io { .. } => None,
        }
    }
}
