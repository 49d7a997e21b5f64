//! Rule catalog for sdlint - GraphQL schema definition linter.
//!
//! This crate provides the rule definitions that sdlint knows about,
//! generated at build time from `knowledge-base/rules.json`.
//!
//! # Usage
//!
//! ```
//! use sdlint_rules::{RULES_DATA, RULE_KINDS};
//!
//! // RULES_DATA is a static array of (rule_id, rule_name) tuples
//! for (id, name) in RULES_DATA {
//!     println!("{}: {}", id, name);
//! }
//!
//! // RULE_KINDS lists the node kinds each rule can check
//! for (id, kind) in RULE_KINDS {
//!     println!("{} -> {}", id, kind);
//! }
//! ```
//!
//! # Rule Categories
//!
//! - **best-practices**: Documentation and conventions for schema authors

// Include the auto-generated rules data from build.rs
include!(concat!(env!("OUT_DIR"), "/rules_data.rs"));

/// Returns the total number of rules.
pub fn rule_count() -> usize {
    RULES_DATA.len()
}

/// Looks up a rule by ID, returning the name if found.
pub fn get_rule_name(id: &str) -> Option<&'static str> {
    RULES_DATA
        .iter()
        .find(|(rule_id, _)| *rule_id == id)
        .map(|(_, name)| *name)
}

/// Check if a rule ID exists in the catalog.
pub fn is_known_rule(id: &str) -> bool {
    get_rule_name(id).is_some()
}

/// Returns the category of a rule, if the rule exists.
pub fn get_rule_category(id: &str) -> Option<&'static str> {
    RULE_CATEGORIES
        .iter()
        .find(|(rule_id, _)| *rule_id == id)
        .map(|(_, category)| *category)
}

/// Returns all rule IDs in a category.
///
/// # Example
/// ```
/// use sdlint_rules::rules_in_category;
///
/// assert!(rules_in_category("best-practices").contains(&"require-description"));
/// assert!(rules_in_category("nonexistent").is_empty());
/// ```
pub fn rules_in_category(category: &str) -> Vec<&'static str> {
    RULE_CATEGORIES
        .iter()
        .filter(|(_, c)| c.eq_ignore_ascii_case(category))
        .map(|(id, _)| *id)
        .collect()
}

/// Returns the default severity of a rule (`error` or `warn`).
pub fn get_rule_severity(id: &str) -> Option<&'static str> {
    RULE_SEVERITIES
        .iter()
        .find(|(rule_id, _)| *rule_id == id)
        .map(|(_, severity)| *severity)
}

/// Looks up a message template by rule ID and message ID.
pub fn get_rule_message(id: &str, message_id: &str) -> Option<&'static str> {
    RULE_MESSAGES
        .iter()
        .find(|(rule_id, mid, _)| *rule_id == id && *mid == message_id)
        .map(|(_, _, template)| *template)
}

/// Returns the node kind names a rule can be configured for.
pub fn kinds_for_rule(id: &str) -> Vec<&'static str> {
    RULE_KINDS
        .iter()
        .filter(|(rule_id, _)| *rule_id == id)
        .map(|(_, kind)| *kind)
        .collect()
}
