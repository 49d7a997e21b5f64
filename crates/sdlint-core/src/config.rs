//! Linter configuration

use crate::{
    ast::SyntaxNodeKind,
    diagnostics::{DiagnosticLevel, LintError, LintResult},
    rules::require_description,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Default config file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = ".sdlint.toml";

/// Configuration for the linter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintConfig {
    /// Glob patterns of paths to skip
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Per-rule settings keyed by rule id
    #[serde(default)]
    pub rules: BTreeMap<String, RuleSetting>,
}

impl Default for LintConfig {
    fn default() -> Self {
        let type_kinds: Vec<&str> = [
            SyntaxNodeKind::ObjectTypeDefinition,
            SyntaxNodeKind::ScalarTypeDefinition,
            SyntaxNodeKind::InterfaceTypeDefinition,
            SyntaxNodeKind::UnionTypeDefinition,
            SyntaxNodeKind::EnumTypeDefinition,
            SyntaxNodeKind::InputObjectTypeDefinition,
        ]
        .iter()
        .map(|kind| kind.as_str())
        .collect();

        let mut rules = BTreeMap::new();
        rules.insert(
            require_description::RULE_ID.to_string(),
            RuleSetting {
                level: RuleLevel::Error,
                options: vec![serde_json::json!({ "on": type_kinds })],
            },
        );

        Self {
            exclude: vec![
                "node_modules/**".to_string(),
                ".git/**".to_string(),
                "target/**".to_string(),
            ],
            rules,
        }
    }
}

/// How a configured rule reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    Off,
    Warn,
    Error,
}

impl RuleLevel {
    /// Diagnostic level for an enabled rule, `None` when off.
    pub fn diagnostic_level(self) -> Option<DiagnosticLevel> {
        match self {
            RuleLevel::Off => None,
            RuleLevel::Warn => Some(DiagnosticLevel::Warning),
            RuleLevel::Error => Some(DiagnosticLevel::Error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSetting {
    pub level: RuleLevel,

    /// Options passed to the rule as-is; the rule validates their shape.
    #[serde(default)]
    pub options: Vec<serde_json::Value>,
}

impl LintConfig {
    /// Load config from file
    pub fn load(path: &Path) -> LintResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| LintError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: LintConfig = toml::from_str(&content).map_err(|e| LintError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.check_rule_ids()?;
        tracing::debug!(path = %path.display(), rules = config.rules.len(), "loaded config");
        Ok(config)
    }

    /// Load `path` if given, else `.sdlint.toml` in `dir` if present, else defaults
    pub fn discover(path: Option<&Path>, dir: &Path) -> LintResult<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            tracing::debug!("no config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Every configured rule id must exist in the catalog.
    pub fn check_rule_ids(&self) -> LintResult<()> {
        match self
            .rules
            .keys()
            .find(|id| !sdlint_rules::is_known_rule(id))
        {
            Some(id) => Err(LintError::UnknownRule(id.clone())),
            None => Ok(()),
        }
    }

    /// Rules that are not `off`, with their reporting level
    pub fn enabled_rules(&self) -> impl Iterator<Item = (&str, DiagnosticLevel, &RuleSetting)> {
        self.rules.iter().filter_map(|(id, setting)| {
            setting
                .level
                .diagnostic_level()
                .map(|level| (id.as_str(), level, setting))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_enables_require_description() {
        let config = LintConfig::default();
        let setting = &config.rules["require-description"];
        assert_eq!(setting.level, RuleLevel::Error);
        assert_eq!(setting.options.len(), 1);

        let on = setting.options[0]["on"].as_array().unwrap();
        assert_eq!(on.len(), 6);
        assert!(on.iter().any(|k| k == "ObjectTypeDefinition"));
        assert!(!on.iter().any(|k| k == "FieldDefinition"));
    }

    #[test]
    fn test_default_levels_match_catalog_severity() {
        let config = LintConfig::default();
        for (id, setting) in &config.rules {
            let level = toml::Value::try_from(setting.level).unwrap();
            assert_eq!(level.as_str(), sdlint_rules::get_rule_severity(id), "{}", id);
        }
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
exclude = ["vendor/**"]

[rules.require-description]
level = "warn"
options = [{ on = ["FieldDefinition", "SchemaDefinition"] }]
"#;

        let config: LintConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.exclude, vec!["vendor/**".to_string()]);
        let setting = &config.rules["require-description"];
        assert_eq!(setting.level, RuleLevel::Warn);
        assert_eq!(
            setting.options[0],
            serde_json::json!({ "on": ["FieldDefinition", "SchemaDefinition"] })
        );
    }

    #[test]
    fn test_toml_minimal_uses_empty_defaults() {
        let config: LintConfig = toml::from_str("").unwrap();
        assert!(config.exclude.is_empty());
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_toml_round_trip_default() {
        let config = LintConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: LintConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_off_rules_not_enabled() {
        let mut config = LintConfig::default();
        config
            .rules
            .get_mut("require-description")
            .unwrap()
            .level = RuleLevel::Off;

        assert_eq!(config.enabled_rules().count(), 0);
    }

    #[test]
    fn test_warn_maps_to_warning() {
        assert_eq!(RuleLevel::Warn.diagnostic_level(), Some(DiagnosticLevel::Warning));
        assert_eq!(RuleLevel::Error.diagnostic_level(), Some(DiagnosticLevel::Error));
        assert_eq!(RuleLevel::Off.diagnostic_level(), None);
    }

    #[test]
    fn test_load_rejects_unknown_rule() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[rules.no-such-rule]\nlevel = \"error\"").unwrap();

        let err = LintConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, LintError::UnknownRule(ref id) if id == "no-such-rule"));
    }

    #[test]
    fn test_load_rejects_bad_level() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[rules.require-description]\nlevel = \"loud\"").unwrap();

        let err = LintConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, LintError::ConfigParse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = LintConfig::load(Path::new("/nonexistent/.sdlint.toml")).unwrap_err();
        assert!(matches!(err, LintError::ConfigRead { .. }));
    }

    #[test]
    fn test_discover_prefers_dir_config() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(DEFAULT_CONFIG_FILE),
            "[rules.require-description]\nlevel = \"off\"\n",
        )
        .unwrap();

        let config = LintConfig::discover(None, temp.path()).unwrap();
        assert_eq!(config.rules["require-description"].level, RuleLevel::Off);
    }

    #[test]
    fn test_discover_falls_back_to_default() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = LintConfig::discover(None, temp.path()).unwrap();
        assert_eq!(config, LintConfig::default());
    }
}
