//! file: core/src/config.rs
//! description: backend configuration and its JSON loader.
//!
//! `BackendConfig` selects the target language and tunes the knobs the
//! emitter and lowering honour. Every field has a default so a config file
//! only needs to mention what it changes.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{Level, QuillErrorExt};
use crate::location::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    #[default]
    #[serde(alias = "py")]
    Python,
    #[serde(alias = "js")]
    Javascript,
}

impl TargetKind {
    pub fn file_extension(&self) -> &'static str {
        match self {
            TargetKind::Python => "py",
            TargetKind::Javascript => "js",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Python => write!(f, "python"),
            TargetKind::Javascript => write!(f, "javascript"),
        }
    }
}

impl FromStr for TargetKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "py" | "python" => Ok(TargetKind::Python),
            "js" | "javascript" => Ok(TargetKind::Javascript),
            other => Err(ConfigError::UnknownTarget(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub target: TargetKind,
    /// Spaces per indentation level in emitted definitions.
    pub indent: usize,
    /// Seed `FALSE` and `TRUE` as atoms 0 and 1 before the program's atoms.
    pub boolean_atoms: bool,
    /// Register atoms on first reference instead of rejecting unknown ones.
    pub implicit_atoms: bool,
    pub pipeline_binding: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            target: TargetKind::Python,
            indent: 2,
            boolean_atoms: true,
            implicit_atoms: false,
            pipeline_binding: "pipes".to_string(),
        }
    }
}

impl BackendConfig {
    pub fn for_target(target: TargetKind) -> Self {
        BackendConfig { target, ..BackendConfig::default() }
    }

    /// Load a config from a JSON file path. Missing fields take defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<BackendConfig, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: BackendConfig = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.indent == 0 {
            return Err(ConfigError::Invalid("indent must be at least 1".to_string()));
        }
        let binding = self.pipeline_binding.trim();
        if binding.is_empty() {
            return Err(ConfigError::Invalid("pipeline_binding is empty".to_string()));
        }
        let mut chars = binding.chars();
        let starts_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if !starts_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ConfigError::Invalid(format!(
                "pipeline_binding `{}` is not a valid identifier",
                self.pipeline_binding
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("unknown target `{0}` (expected python or javascript)")]
    UnknownTarget(String),
}

impl QuillErrorExt for ConfigError {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        self.to_string()
    }

    fn issuer(&self) -> String {
        "quill.config".to_string()
    }

    fn location(&self) -> Option<Location> {
        match self {
            ConfigError::Parse { path, source } => {
                Some(Location::new(path.display().to_string(), source.line(), source.column()))
            }
            _ => None,
        }
    }
}
