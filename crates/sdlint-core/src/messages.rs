//! Message template rendering.
//!
//! Templates use `{{ key }}` placeholders. Placeholders without a matching
//! data entry are left as written.

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::OnceLock;

fn placeholder_pattern() -> &'static Regex {
    static STORE: OnceLock<Regex> = OnceLock::new();
    STORE.get_or_init(|| {
        Regex::new(r"\{\{([^{}]+?)\}\}").expect("BUG: invalid placeholder regex")
    })
}

/// Substitute `data` values into `template`.
pub fn interpolate(template: &str, data: &BTreeMap<String, String>) -> String {
    placeholder_pattern()
        .replace_all(template, |caps: &Captures<'_>| {
            let key = caps[1].trim();
            match data.get(key) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
