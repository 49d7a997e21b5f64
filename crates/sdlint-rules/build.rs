//! Build script for sdlint-rules.
//!
//! Generates Rust code from rules.json at compile time.
//! Supports both local crate builds (crates.io) and workspace builds (development).
//!
//! Generated constants:
//! - `RULES_DATA`: All rule (id, name) tuples
//! - `RULE_CATEGORIES`: All rule (id, category) tuples
//! - `RULE_KINDS`: All rule (id, node kind) tuples from `applies_to`
//! - `RULE_SEVERITIES`: All rule (id, default severity) tuples
//! - `RULE_MESSAGES`: All rule (id, message id, template) tuples

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed file size for rules.json (1 MB)
const MAX_RULES_FILE_SIZE: u64 = 1024 * 1024;

/// Find the workspace root by searching for Cargo.toml with [workspace]
fn find_workspace_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|path| {
            fs::read_to_string(path.join("Cargo.toml"))
                .ok()
                .is_some_and(|content| {
                    content.contains("[workspace]") || content.contains("[workspace.")
                })
        })
        .map(|p| p.to_path_buf())
}

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let manifest_path = Path::new(&manifest_dir);

    // Crate-local rules.json wins (crates.io builds), then knowledge-base/rules.json
    let crate_rules = manifest_path.join("rules.json");
    let workspace_rules =
        find_workspace_root(manifest_path).map(|root| root.join("knowledge-base/rules.json"));

    println!("cargo:rerun-if-changed={}", crate_rules.display());

    let rules_path = if crate_rules.exists() {
        crate_rules
    } else if let Some(ws_rules) = workspace_rules {
        if ws_rules.exists() {
            println!("cargo:rerun-if-changed={}", ws_rules.display());
            ws_rules
        } else {
            panic!(
                "Could not find rules.json at {} or {}",
                manifest_path.join("rules.json").display(),
                ws_rules.display()
            );
        }
    } else {
        panic!(
            "Could not find rules.json at {} (no workspace root found)",
            manifest_path.join("rules.json").display()
        );
    };

    let file_size = fs::metadata(&rules_path)
        .unwrap_or_else(|e| panic!("Failed to get metadata for {}: {}", rules_path.display(), e))
        .len();
    if file_size > MAX_RULES_FILE_SIZE {
        panic!(
            "rules.json at {} is too large ({} bytes, max {} bytes)",
            rules_path.display(),
            file_size,
            MAX_RULES_FILE_SIZE
        );
    }

    let rules_json = fs::read_to_string(&rules_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read rules.json at {}: {}",
            rules_path.display(),
            e
        )
    });

    let rules: serde_json::Value = serde_json::from_str(&rules_json).unwrap_or_else(|e| {
        panic!(
            "Failed to parse rules.json at {}: {}",
            rules_path.display(),
            e
        )
    });

    let rules_array = rules["rules"]
        .as_array()
        .expect("rules.json must have a 'rules' array");

    let escape_str = |s: &str| {
        s.replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    };

    // Rule ids are kebab-case, e.g. require-description
    let is_valid_id = |id: &str| -> bool {
        !id.is_empty()
            && id.len() <= 64
            && !id.starts_with('-')
            && !id.ends_with('-')
            && id
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    };

    let is_valid_name = |name: &str| -> bool {
        !name.is_empty() && name.len() <= 200 && !name.chars().any(|c| c.is_control())
    };

    let mut seen_ids: BTreeSet<&str> = BTreeSet::new();
    let mut data = String::new();
    let mut categories = String::new();
    let mut kinds = String::new();
    let mut severities = String::new();
    let mut messages = String::new();

    for (idx, rule) in rules_array.iter().enumerate() {
        let id = rule["id"]
            .as_str()
            .unwrap_or_else(|| panic!("rule[{}] must have string 'id' field", idx));
        let name = rule["name"]
            .as_str()
            .unwrap_or_else(|| panic!("rule[{}] must have string 'name' field", idx));
        let category = rule["category"]
            .as_str()
            .unwrap_or_else(|| panic!("rule[{}] must have string 'category' field", idx));

        let severity = rule["severity"]
            .as_str()
            .unwrap_or_else(|| panic!("rule[{}] must have string 'severity' field", idx));
        if !matches!(severity, "error" | "warn") {
            panic!(
                "rule[{}] '{}' has invalid severity '{}': must be 'error' or 'warn'",
                idx, id, severity
            );
        }
        let rule_messages = rule["messages"]
            .as_object()
            .unwrap_or_else(|| panic!("rule[{}] must have a 'messages' object", idx));
        if rule_messages.is_empty() {
            panic!("rule[{}] '{}' must declare at least one message", idx, id);
        }

        if !is_valid_id(id) {
            panic!(
                "rule[{}] has invalid id '{}': must be 1-64 lowercase alphanumeric/hyphen characters",
                idx, id
            );
        }
        if !is_valid_name(name) {
            panic!(
                "rule[{}] '{}' has invalid name: must be 1-200 chars, no control characters",
                idx, id
            );
        }
        if !seen_ids.insert(id) {
            panic!("rule[{}] duplicates id '{}'", idx, id);
        }

        data.push_str(&format!(
            "    (\"{}\", \"{}\"),\n",
            escape_str(id),
            escape_str(name)
        ));
        categories.push_str(&format!(
            "    (\"{}\", \"{}\"),\n",
            escape_str(id),
            escape_str(category)
        ));

        severities.push_str(&format!(
            "    (\"{}\", \"{}\"),\n",
            escape_str(id),
            escape_str(severity)
        ));
        for (message_id, template) in rule_messages {
            let template = template.as_str().unwrap_or_else(|| {
                panic!("rule[{}] message '{}' must be a string", idx, message_id)
            });
            messages.push_str(&format!(
                "    (\"{}\", \"{}\", \"{}\"),\n",
                escape_str(id),
                escape_str(message_id),
                escape_str(template)
            ));
        }

        if let Some(applies_to) = rule.get("applies_to").and_then(|a| a.as_array()) {
            for kind in applies_to.iter().filter_map(|k| k.as_str()) {
                kinds.push_str(&format!(
                    "    (\"{}\", \"{}\"),\n",
                    escape_str(id),
                    escape_str(kind)
                ));
            }
        }
    }

    let mut generated_code = String::new();
    generated_code.push_str("// Auto-generated from rules.json by build.rs\n");
    generated_code.push_str("// Do not edit manually!\n\n");
    generated_code.push_str("/// Rule data as (id, name) tuples.\n");
    generated_code.push_str("pub const RULES_DATA: &[(&str, &str)] = &[\n");
    generated_code.push_str(&data);
    generated_code.push_str("];\n\n");
    generated_code.push_str("/// Rule categories as (id, category) tuples.\n");
    generated_code.push_str("pub const RULE_CATEGORIES: &[(&str, &str)] = &[\n");
    generated_code.push_str(&categories);
    generated_code.push_str("];\n\n");
    generated_code.push_str("/// Node kinds each rule can check, as (id, kind) tuples.\n");
    generated_code.push_str("pub const RULE_KINDS: &[(&str, &str)] = &[\n");
    generated_code.push_str(&kinds);
    generated_code.push_str("];\n\n");
    generated_code.push_str("/// Default severity per rule, as (id, severity) tuples.\n");
    generated_code.push_str("pub const RULE_SEVERITIES: &[(&str, &str)] = &[\n");
    generated_code.push_str(&severities);
    generated_code.push_str("];\n\n");
    generated_code.push_str("/// Message templates as (id, message id, template) tuples.\n");
    generated_code.push_str("pub const RULE_MESSAGES: &[(&str, &str, &str)] = &[\n");
    generated_code.push_str(&messages);
    generated_code.push_str("];\n");

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("rules_data.rs");
    fs::write(&dest_path, generated_code).expect("Failed to write generated rules");
}
