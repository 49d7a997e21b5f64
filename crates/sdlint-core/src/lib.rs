//! # sdlint-core
//!
//! Rule contract and validation engine for GraphQL schema definitions.
//!
//! Documents arrive already parsed, as a [`ast::SyntaxNode`] tree. Each
//! configured [`rules::Rule`] builds a kind-to-visitor table once; the
//! [`Linter`] walks every document and hands matching nodes to the visitors,
//! which report findings into a [`diagnostics::DiagnosticSink`].

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod messages;
pub mod parsers;
pub mod rules;
pub mod traverse;

use std::path::{Path, PathBuf};

use rayon::prelude::*;

pub use ast::{Location, Position, SyntaxNode, SyntaxNodeKind, TextLiteral};
pub use config::{LintConfig, RuleLevel, RuleSetting};
pub use diagnostics::{Diagnostic, DiagnosticLevel, DiagnosticSink, LintError, LintResult};
use rules::{RuleContext, RuleMeta, VisitorMap};

/// A rule bound to its configuration, ready to visit documents
struct RuleInstance {
    meta: RuleMeta,
    level: DiagnosticLevel,
    visitors: VisitorMap,
}

/// Result of linting a file or directory
#[derive(Debug, Clone, Default)]
pub struct LintRun {
    pub files_checked: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Configured set of rule instances
pub struct Linter {
    rules: Vec<RuleInstance>,
    exclude: Vec<glob::Pattern>,
}

impl Linter {
    /// Instantiate every enabled rule. The first invalid rule configuration
    /// aborts construction.
    pub fn new(config: &LintConfig) -> LintResult<Self> {
        config.check_rule_ids()?;

        let mut instances = Vec::new();
        for (id, level, setting) in config.enabled_rules() {
            let rule = rules::find_rule(id).ok_or_else(|| LintError::UnknownRule(id.to_string()))?;
            let visitors = rule.create(&setting.options)?;
            tracing::debug!(rule = id, kinds = visitors.len(), "rule instantiated");
            instances.push(RuleInstance {
                meta: rule.meta(),
                level,
                visitors,
            });
        }

        let exclude = config
            .exclude
            .iter()
            .map(|p| {
                glob::Pattern::new(p).map_err(|e| LintError::InvalidExclude {
                    pattern: p.clone(),
                    source: e,
                })
            })
            .collect::<LintResult<Vec<_>>>()?;

        Ok(Self {
            rules: instances,
            exclude,
        })
    }

    /// Number of enabled rule instances
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Run every rule over one document tree
    pub fn lint_document(&self, file: &Path, root: &SyntaxNode) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for instance in &self.rules {
            let mut ctx = RuleContext::new(&instance.meta, instance.level, file, &mut diagnostics);
            traverse::traverse(root, &instance.visitors, &mut ctx);
        }
        diagnostics
    }

    /// Read, decode and lint a single document file
    pub fn lint_file(&self, path: &Path) -> LintResult<Vec<Diagnostic>> {
        tracing::trace!(path = %path.display(), "linting file");
        let root = parsers::read_document(path)?;
        Ok(self.lint_document(path, &root))
    }

    /// Lint a document file, or every document under a directory
    pub fn lint_path(&self, path: &Path) -> LintResult<LintRun> {
        if !path.exists() {
            return Err(LintError::FileRead {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "path does not exist"),
            });
        }

        let paths = if path.is_file() {
            vec![path.to_path_buf()]
        } else {
            self.collect_documents(path)
        };
        tracing::debug!(root = %path.display(), files = paths.len(), "collected documents");

        // Rule instances hold no per-document state, so documents lint independently
        let mut diagnostics: Vec<Diagnostic> = paths
            .par_iter()
            .flat_map(|file_path| match self.lint_file(file_path) {
                Ok(file_diagnostics) => file_diagnostics,
                Err(e) => vec![Diagnostic::error(
                    file_path.clone(),
                    Location::default(),
                    "file::read",
                    format!("Failed to lint file: {}", e.with_causes()),
                )],
            })
            .collect();

        sort_diagnostics(&mut diagnostics);

        Ok(LintRun {
            files_checked: paths.len(),
            diagnostics,
        })
    }

    fn collect_documents(&self, root: &Path) -> Vec<PathBuf> {
        use ignore::WalkBuilder;

        let mut paths: Vec<PathBuf> = WalkBuilder::new(root)
            .standard_filters(true)
            .build()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter(|entry| parsers::json::is_document_path(entry.path()))
            .filter(|entry| {
                let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
                !self.exclude.iter().any(|p| p.matches_path(relative))
            })
            .map(|entry| entry.path().to_path_buf())
            .collect();
        paths.sort();
        paths
    }
}

/// Errors first, then by file, position and rule
pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by(|a, b| {
        a.level
            .cmp(&b.level)
            .then_with(|| a.file.cmp(&b.file))
            .then_with(|| a.location.start.cmp(&b.location.start))
            .then_with(|| a.rule.cmp(&b.rule))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SCHEMA_DOC: &str = r#"{
        "kind": "Document",
        "children": [
            {
                "kind": "ObjectTypeDefinition",
                "loc": { "start": { "line": 2, "column": 1 }, "end": { "line": 4, "column": 2 } },
                "name": { "text": "User", "loc": { "start": { "line": 2, "column": 6 }, "end": { "line": 2, "column": 10 } } },
                "children": [
                    {
                        "kind": "FieldDefinition",
                        "loc": { "start": { "line": 3, "column": 3 }, "end": { "line": 3, "column": 15 } },
                        "name": { "text": "name", "loc": { "start": { "line": 3, "column": 3 }, "end": { "line": 3, "column": 7 } } },
                        "description": { "text": "Display name" }
                    }
                ]
            }
        ]
    }"#;

    fn config_on(level: RuleLevel, on: &[&str]) -> LintConfig {
        let mut config = LintConfig::default();
        config.rules.insert(
            "require-description".to_string(),
            RuleSetting {
                level,
                options: vec![json!({ "on": on })],
            },
        );
        config
    }

    fn write_doc(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_linter_has_one_rule() {
        let linter = Linter::new(&LintConfig::default()).unwrap();
        assert_eq!(linter.rule_count(), 1);
    }

    #[test]
    fn test_off_rule_not_instantiated() {
        let linter = Linter::new(&config_on(RuleLevel::Off, &["Foo"])).unwrap();
        assert_eq!(linter.rule_count(), 0);
    }

    #[test]
    fn test_misconfigured_rule_is_fatal() {
        let err = Linter::new(&config_on(RuleLevel::Error, &[])).err().unwrap();
        assert!(matches!(err, LintError::Configuration { .. }));

        let err = Linter::new(&config_on(RuleLevel::Error, &["Foo"])).err().unwrap();
        assert!(matches!(err, LintError::Configuration { .. }));
    }

    #[test]
    fn test_unknown_rule_rejected() {
        let mut config = LintConfig::default();
        config.rules.insert(
            "no-such-rule".to_string(),
            RuleSetting {
                level: RuleLevel::Error,
                options: vec![],
            },
        );
        assert!(matches!(
            Linter::new(&config).err().unwrap(),
            LintError::UnknownRule(_)
        ));
    }

    #[test]
    fn test_invalid_exclude_rejected() {
        let mut config = LintConfig::default();
        config.exclude = vec!["[".to_string()];
        assert!(matches!(
            Linter::new(&config).err().unwrap(),
            LintError::InvalidExclude { .. }
        ));
    }

    #[test]
    fn test_lint_document_reports_type_only() {
        let linter = Linter::new(&LintConfig::default()).unwrap();
        let root = parsers::parse_document(Path::new("s.graphql.json"), SCHEMA_DOC).unwrap();

        let diagnostics = linter.lint_document(Path::new("s.graphql.json"), &root);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].level, DiagnosticLevel::Error);
        assert_eq!(diagnostics[0].location.start, Position::new(2, 5));
        assert_eq!(diagnostics[0].location.end, Position::new(2, 13));
    }

    #[test]
    fn test_warn_level_propagates() {
        let linter =
            Linter::new(&config_on(RuleLevel::Warn, &["ObjectTypeDefinition"])).unwrap();
        let root = parsers::parse_document(Path::new("s.graphql.json"), SCHEMA_DOC).unwrap();

        let diagnostics = linter.lint_document(Path::new("s.graphql.json"), &root);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].level, DiagnosticLevel::Warning);
    }

    #[test]
    fn test_lint_path_single_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = write_doc(temp.path(), "schema.graphql.json", SCHEMA_DOC);
        let linter = Linter::new(&LintConfig::default()).unwrap();

        let run = linter.lint_path(&path).unwrap();
        assert_eq!(run.files_checked, 1);
        assert_eq!(run.diagnostics.len(), 1);
        assert_eq!(run.diagnostics[0].file, path);
    }

    #[test]
    fn test_lint_path_walks_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        write_doc(temp.path(), "a.graphql.json", SCHEMA_DOC);
        write_doc(temp.path(), "nested/b.graphql.json", SCHEMA_DOC);
        write_doc(temp.path(), "notes.json", "{}");
        let linter = Linter::new(&LintConfig::default()).unwrap();

        let run = linter.lint_path(temp.path()).unwrap();
        assert_eq!(run.files_checked, 2);
        assert_eq!(run.diagnostics.len(), 2);
    }

    #[test]
    fn test_lint_path_respects_exclude() {
        let temp = tempfile::TempDir::new().unwrap();
        write_doc(temp.path(), "a.graphql.json", SCHEMA_DOC);
        write_doc(temp.path(), "vendor/b.graphql.json", SCHEMA_DOC);
        let mut config = LintConfig::default();
        config.exclude = vec!["vendor/**".to_string()];
        let linter = Linter::new(&config).unwrap();

        let run = linter.lint_path(temp.path()).unwrap();
        assert_eq!(run.files_checked, 1);
    }

    #[test]
    fn test_lint_path_bad_document_becomes_diagnostic() {
        let temp = tempfile::TempDir::new().unwrap();
        write_doc(temp.path(), "broken.graphql.json", "{ nope");
        write_doc(temp.path(), "ok.graphql.json", SCHEMA_DOC);
        let linter = Linter::new(&LintConfig::default()).unwrap();

        let run = linter.lint_path(temp.path()).unwrap();
        assert_eq!(run.files_checked, 2);
        assert!(run
            .diagnostics
            .iter()
            .any(|d| d.rule == "file::read" && d.file.ends_with("broken.graphql.json")));
    }

    #[test]
    fn test_lint_path_read_diagnostic_keeps_cause() {
        let temp = tempfile::TempDir::new().unwrap();
        write_doc(temp.path(), "broken.graphql.json", r#"{ "kind": "Nope" }"#);
        let linter = Linter::new(&LintConfig::default()).unwrap();

        let run = linter.lint_path(temp.path()).unwrap();
        assert_eq!(run.diagnostics.len(), 1);
        let message = &run.diagnostics[0].message;
        assert!(message.starts_with("Failed to lint file: Failed to parse document"));
        assert!(message.contains("unknown variant `Nope`"), "{}", message);
    }

    #[test]
    fn test_description_without_text_is_linted() {
        let doc = r#"{
            "kind": "Document",
            "children": [
                {
                    "kind": "ObjectTypeDefinition",
                    "loc": { "start": { "line": 2, "column": 1 }, "end": { "line": 4, "column": 2 } },
                    "name": { "text": "User", "loc": { "start": { "line": 2, "column": 6 }, "end": { "line": 2, "column": 10 } } },
                    "description": { "loc": { "start": { "line": 1, "column": 1 }, "end": { "line": 1, "column": 9 } } }
                },
                {
                    "kind": "EnumTypeDefinition",
                    "loc": { "start": { "line": 6, "column": 1 }, "end": { "line": 8, "column": 2 } },
                    "name": { "text": "Role", "loc": { "start": { "line": 6, "column": 6 }, "end": { "line": 6, "column": 10 } } }
                }
            ]
        }"#;
        let temp = tempfile::TempDir::new().unwrap();
        write_doc(temp.path(), "schema.graphql.json", doc);
        let linter = Linter::new(&LintConfig::default()).unwrap();

        let run = linter.lint_path(temp.path()).unwrap();
        let rules: Vec<&str> = run.diagnostics.iter().map(|d| d.rule.as_str()).collect();
        assert_eq!(rules, vec!["require-description", "require-description"]);
        assert_eq!(run.diagnostics[0].data["nodeType"], "ObjectTypeDefinition");
        assert_eq!(run.diagnostics[1].data["nodeType"], "EnumTypeDefinition");
    }

    #[test]
    fn test_lint_path_missing() {
        let linter = Linter::new(&LintConfig::default()).unwrap();
        let err = linter
            .lint_path(Path::new("/nonexistent/schema.graphql.json"))
            .unwrap_err();
        assert!(matches!(err, LintError::FileRead { .. }));
    }

    #[test]
    fn test_lint_path_empty_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        let linter = Linter::new(&LintConfig::default()).unwrap();

        let run = linter.lint_path(temp.path()).unwrap();
        assert_eq!(run.files_checked, 0);
        assert!(run.diagnostics.is_empty());
    }

    #[test]
    fn test_sort_errors_first_then_position() {
        let linter = Linter::new(&config_on(RuleLevel::Warn, &["FieldDefinition"])).unwrap();

        let temp = tempfile::TempDir::new().unwrap();
        let doc = SCHEMA_DOC.replace(r#""description": { "text": "Display name" }"#, r#""description": { "text": " " }"#);
        write_doc(temp.path(), "a.graphql.json", &doc);
        write_doc(temp.path(), "z.graphql.json", "{ nope");

        let run = linter.lint_path(temp.path()).unwrap();
        assert_eq!(run.diagnostics.len(), 2);
        assert_eq!(run.diagnostics[0].level, DiagnosticLevel::Error);
        assert_eq!(run.diagnostics[0].rule, "file::read");
        assert_eq!(run.diagnostics[1].level, DiagnosticLevel::Warning);
    }

    #[test]
    fn test_parallel_linting_deterministic_output() {
        let temp = tempfile::TempDir::new().unwrap();
        for i in 0..8 {
            write_doc(temp.path(), &format!("part-{}/schema.graphql.json", i), SCHEMA_DOC);
        }
        let linter = Linter::new(&config_on(
            RuleLevel::Error,
            &["ObjectTypeDefinition", "FieldDefinition"],
        ))
        .unwrap();

        let first = linter.lint_path(temp.path()).unwrap();
        assert_eq!(first.diagnostics.len(), 8);

        for run in 1..=5 {
            let next = linter.lint_path(temp.path()).unwrap();
            assert_eq!(first.diagnostics, next.diagnostics, "run {} differs", run);
        }
    }
}
