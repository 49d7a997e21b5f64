//! Diagnostic types and error reporting

use crate::ast::Location;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

pub type LintResult<T> = Result<T, LintError>;

/// A diagnostic message from the linter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub rule: String,
    pub message_id: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
    pub file: PathBuf,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Error,
    Warning,
}

impl Diagnostic {
    pub fn error(file: PathBuf, location: Location, rule: &str, message: String) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            rule: rule.to_string(),
            message_id: rule.to_string(),
            message,
            data: BTreeMap::new(),
            file,
            location,
        }
    }

    pub fn line(&self) -> usize {
        self.location.start.line
    }

    pub fn column(&self) -> usize {
        self.location.start.column
    }
}

/// Receiver for findings produced while a rule runs.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Linter errors
#[derive(Error, Debug)]
pub enum LintError {
    #[error("Invalid configuration for rule '{rule}': {reason}")]
    Configuration { rule: String, reason: String },

    #[error("Unknown rule '{0}' in configuration")]
    UnknownRule(String),

    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid exclude pattern '{pattern}'")]
    InvalidExclude {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse document: {path}")]
    DocumentParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LintError {
    /// The error message followed by each underlying cause.
    pub fn with_causes(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }

    pub fn configuration(rule: &str, reason: impl Into<String>) -> Self {
        LintError::Configuration {
            rule: rule.to_string(),
            reason: reason.into(),
        }
    }
}
