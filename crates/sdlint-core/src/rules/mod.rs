//! Validation rules

pub mod require_description;

use crate::{
    ast::{Location, SyntaxNode, SyntaxNodeKind},
    diagnostics::{Diagnostic, DiagnosticLevel, DiagnosticSink, LintResult},
    messages::interpolate,
};
use std::collections::BTreeMap;
use std::path::Path;

/// Callback run for every visited node of a registered kind.
pub type NodeVisitor = fn(&SyntaxNode, &mut RuleContext<'_>);

/// Dispatch table built once per rule instance.
pub type VisitorMap = BTreeMap<SyntaxNodeKind, NodeVisitor>;

/// Self-description of a rule.
#[derive(Debug, Clone)]
pub struct RuleMeta {
    pub id: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    /// Kinds the rule can be configured for.
    pub kinds: &'static [SyntaxNodeKind],
    /// JSON Schema for the rule's options array.
    pub schema: serde_json::Value,
    /// (message id, template) pairs.
    pub messages: &'static [(&'static str, &'static str)],
}

impl RuleMeta {
    pub fn message(&self, message_id: &str) -> Option<&'static str> {
        self.messages
            .iter()
            .find(|(id, _)| *id == message_id)
            .map(|(_, template)| *template)
    }
}

/// Trait for node-kind rules
pub trait Rule: Send + Sync {
    fn meta(&self) -> RuleMeta;

    /// Validate `options` and build the visitor table.
    fn create(&self, options: &[serde_json::Value]) -> LintResult<VisitorMap>;
}

/// A finding as a rule describes it, before it is bound to a file and level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub message_id: &'static str,
    pub data: BTreeMap<String, String>,
    pub location: Location,
}

/// What a running visitor can see and report to.
pub struct RuleContext<'a> {
    rule: &'static str,
    level: DiagnosticLevel,
    file: &'a Path,
    messages: &'static [(&'static str, &'static str)],
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        meta: &RuleMeta,
        level: DiagnosticLevel,
        file: &'a Path,
        sink: &'a mut dyn DiagnosticSink,
    ) -> Self {
        Self {
            rule: meta.id,
            level,
            file,
            messages: meta.messages,
            sink,
        }
    }

    pub fn report(&mut self, report: Report) {
        let message = self
            .messages
            .iter()
            .find(|(id, _)| *id == report.message_id)
            .map(|(_, template)| interpolate(template, &report.data))
            .unwrap_or_else(|| report.message_id.to_string());

        self.sink.report(Diagnostic {
            level: self.level,
            rule: self.rule.to_string(),
            message_id: report.message_id.to_string(),
            message,
            data: report.data,
            file: self.file.to_path_buf(),
            location: report.location,
        });
    }
}

/// Every rule sdlint ships, constructed explicitly.
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![Box::new(require_description::RequireDescription)]
}

/// Look up a shipped rule by id.
pub fn find_rule(id: &str) -> Option<Box<dyn Rule>> {
    all_rules().into_iter().find(|rule| rule.meta().id == id)
}
