//! JSON decoder for pre-parsed schema documents

use crate::{
    ast::SyntaxNode,
    diagnostics::{LintError, LintResult},
};
use std::path::Path;

/// File suffix of documents the linter picks up when walking a directory
pub const DOCUMENT_SUFFIX: &str = ".graphql.json";

/// Decode a document tree from its JSON interchange form
pub fn parse_document(path: &Path, content: &str) -> LintResult<SyntaxNode> {
    serde_json::from_str(content).map_err(|e| LintError::DocumentParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read and decode a document from disk
pub fn read_document(path: &Path) -> LintResult<SyntaxNode> {
    let content = std::fs::read_to_string(path).map_err(|e| LintError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_document(path, &content)
}

pub fn is_document_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.ends_with(DOCUMENT_SUFFIX) && name.len() > DOCUMENT_SUFFIX.len())
}
