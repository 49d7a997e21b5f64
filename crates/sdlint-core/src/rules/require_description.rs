//! Description presence on type system definitions
//!
//! Flags definitions whose description is missing or blank.

use crate::{
    ast::{Location, Position, SyntaxNode, SyntaxNodeKind},
    diagnostics::{LintError, LintResult},
    rules::{NodeVisitor, Report, Rule, RuleContext, RuleMeta, VisitorMap},
};
use schemars::gen::SchemaGenerator;
use schemars::schema::{ArrayValidation, InstanceType, Schema, SchemaObject, SingleOrVec};
use schemars::{schema_for, JsonSchema};
use serde::Deserialize;
use std::collections::BTreeMap;

pub const RULE_ID: &str = "require-description";
pub const MESSAGE_ID: &str = "description required";

const MESSAGES: &[(&str, &str)] = &[(
    MESSAGE_ID,
    "Description is required for nodes of type \"{{ nodeType }}\"",
)];

/// The single options object accepted by the rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RequireDescriptionOptions {
    /// Node kinds that must carry a description.
    #[schemars(schema_with = "describable_kinds_schema")]
    pub on: Vec<SyntaxNodeKind>,
}

fn describable_kinds_schema(_generator: &mut SchemaGenerator) -> Schema {
    let item = SchemaObject {
        instance_type: Some(InstanceType::String.into()),
        enum_values: Some(
            SyntaxNodeKind::DESCRIBABLE
                .iter()
                .map(|kind| serde_json::Value::from(kind.as_str()))
                .collect(),
        ),
        ..Default::default()
    };

    SchemaObject {
        instance_type: Some(InstanceType::Array.into()),
        array: Some(Box::new(ArrayValidation {
            items: Some(SingleOrVec::Single(Box::new(item.into()))),
            min_items: Some(1),
            ..Default::default()
        })),
        ..Default::default()
    }
    .into()
}

pub struct RequireDescription;

impl Rule for RequireDescription {
    fn meta(&self) -> RuleMeta {
        RuleMeta {
            id: RULE_ID,
            description: "Require a description on type system definitions",
            category: "best-practices",
            kinds: SyntaxNodeKind::DESCRIBABLE,
            schema: serde_json::json!({
                "type": "array",
                "minItems": 1,
                "maxItems": 1,
                "items": schema_for!(RequireDescriptionOptions),
            }),
            messages: MESSAGES,
        }
    }

    fn create(&self, options: &[serde_json::Value]) -> LintResult<VisitorMap> {
        let [option] = options else {
            return Err(LintError::configuration(
                RULE_ID,
                format!(
                    "expected exactly one options object, found {}",
                    options.len()
                ),
            ));
        };

        let parsed: RequireDescriptionOptions = serde_json::from_value(option.clone())
            .map_err(|e| LintError::configuration(RULE_ID, e.to_string()))?;

        if parsed.on.is_empty() {
            return Err(LintError::configuration(
                RULE_ID,
                "`on` must list at least one node kind",
            ));
        }

        let mut visitors = VisitorMap::new();
        for kind in parsed.on {
            if !kind.is_describable() {
                return Err(LintError::configuration(
                    RULE_ID,
                    format!("`{}` cannot carry a description", kind),
                ));
            }
            if visitors
                .insert(kind, check_description as NodeVisitor)
                .is_some()
            {
                tracing::debug!(rule = RULE_ID, kind = %kind, "duplicate kind in `on` collapsed");
            }
        }

        Ok(visitors)
    }
}

/// True when the node has a description with visible text.
pub fn has_description(node: &SyntaxNode) -> bool {
    node.description
        .as_ref()
        .and_then(|description| description.as_str())
        .is_some_and(|text| !text.trim().is_empty())
}

/// Span reported for a node without a description.
///
/// Named nodes cover their name token, shifted one column left. The schema
/// definition has no name, so its span runs from one column left of the node
/// start to the unadjusted node end. A named kind that arrives without its
/// name falls back to the node span as well.
pub fn report_location(node: &SyntaxNode) -> Location {
    let name = node.name.as_ref().filter(|_| node.kind.has_name());
    match name {
        Some(name) => Location::new(
            Position::new(
                name.loc.start.line,
                name.loc.start.column.saturating_sub(1),
            ),
            Position::new(
                name.loc.end.line,
                name.loc
                    .end
                    .column
                    .saturating_sub(1)
                    .saturating_add(name.as_str().map_or(0, |text| text.chars().count())),
            ),
        ),
        None => Location::new(
            Position::new(node.loc.start.line, node.loc.start.column.saturating_sub(1)),
            node.loc.end,
        ),
    }
}

fn check_description(node: &SyntaxNode, ctx: &mut RuleContext<'_>) {
    if has_description(node) {
        return;
    }

    ctx.report(Report {
        message_id: MESSAGE_ID,
        data: BTreeMap::from([("nodeType".to_string(), node.kind.to_string())]),
        location: report_location(node),
    });
}
