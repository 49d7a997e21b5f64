//! JSON output format support.
//!
//! Provides a simple, machine-readable JSON output format for sdlint diagnostics.

use sdlint_core::diagnostics::{Diagnostic, DiagnosticLevel};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Root structure for JSON output.
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    /// Version of sdlint that produced this output.
    pub version: String,
    /// Number of documents linted.
    pub files_checked: usize,
    /// List of diagnostics found.
    pub diagnostics: Vec<JsonDiagnostic>,
    /// Summary counts by level.
    pub summary: JsonSummary,
}

/// A single diagnostic in JSON format.
#[derive(Debug, Serialize)]
pub struct JsonDiagnostic {
    /// Severity level: error or warning.
    pub level: String,
    /// Rule identifier (e.g., require-description).
    pub rule: String,
    /// Message template key.
    pub message_id: String,
    /// File path (forward slashes for cross-platform consistency).
    pub file: String,
    pub start: JsonPosition,
    pub end: JsonPosition,
    /// Rendered diagnostic message.
    pub message: String,
    /// Values interpolated into the message template.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct JsonPosition {
    pub line: usize,
    pub column: usize,
}

/// Summary counts by diagnostic level.
#[derive(Debug, Serialize)]
pub struct JsonSummary {
    /// Number of errors.
    pub errors: usize,
    /// Number of warnings.
    pub warnings: usize,
}

fn level_to_string(level: DiagnosticLevel) -> &'static str {
    match level {
        DiagnosticLevel::Error => "error",
        DiagnosticLevel::Warning => "warning",
    }
}

pub(crate) fn path_to_string(path: &Path, base_path: &Path) -> String {
    path.strip_prefix(base_path)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Convert diagnostics to JSON output format.
pub fn diagnostics_to_json(
    diagnostics: &[Diagnostic],
    files_checked: usize,
    base_path: &Path,
) -> JsonOutput {
    let mut errors = 0;
    let mut warnings = 0;

    let json_diagnostics: Vec<JsonDiagnostic> = diagnostics
        .iter()
        .map(|diag| {
            match diag.level {
                DiagnosticLevel::Error => errors += 1,
                DiagnosticLevel::Warning => warnings += 1,
            }
            JsonDiagnostic {
                level: level_to_string(diag.level).to_string(),
                rule: diag.rule.clone(),
                message_id: diag.message_id.clone(),
                file: path_to_string(&diag.file, base_path),
                start: JsonPosition {
                    line: diag.location.start.line,
                    column: diag.location.start.column,
                },
                end: JsonPosition {
                    line: diag.location.end.line,
                    column: diag.location.end.column,
                },
                message: diag.message.clone(),
                data: diag.data.clone(),
            }
        })
        .collect();

    JsonOutput {
        version: env!("CARGO_PKG_VERSION").to_string(),
        files_checked,
        diagnostics: json_diagnostics,
        summary: JsonSummary { errors, warnings },
    }
}
