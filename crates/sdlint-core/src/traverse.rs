//! Pre-order walk that dispatches nodes to rule visitors

use crate::{
    ast::SyntaxNode,
    rules::{RuleContext, VisitorMap},
};

/// Visit `root` and its descendants, parents before children.
///
/// Nodes whose kind has no entry in `visitors` are walked through but never
/// handed to a rule.
pub fn traverse(root: &SyntaxNode, visitors: &VisitorMap, ctx: &mut RuleContext<'_>) {
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if let Some(visitor) = visitors.get(&node.kind) {
            visitor(node, ctx);
        }
        // Reverse so the first child is popped first
        stack.extend(node.children.iter().rev());
    }
}
