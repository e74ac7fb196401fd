use anyhow::{anyhow, Context, Result};
use parity_validate::RuleConfigs;
use serde_json::Value;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleConfigFormat {
    Yaml,
    Json,
}

impl RuleConfigFormat {
    /// `None` for unknown extensions.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("yaml") | Some("yml") => Some(Self::Yaml),
            Some("json") => Some(Self::Json),
            _ => None,
        }
    }
}

/// Reads per-rule settings from a YAML or JSON file. Unknown extensions are
/// tried as JSON first, then YAML.
pub fn load_rule_configs(path: &Path) -> Result<RuleConfigs> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read rule config {}", path.display()))?;
    let configs = match RuleConfigFormat::from_path(path) {
        Some(format) => parse_rule_configs(&text, format),
        None => parse_rule_configs(&text, RuleConfigFormat::Json).or_else(|_| parse_rule_configs(&text, RuleConfigFormat::Yaml)),
    }
    .with_context(|| format!("parse rule config {}", path.display()))?;
    tracing::debug!(path = %path.display(), rules = configs.len(), "loaded rule configs");
    Ok(configs)
}

/// Accepts a top-level `rules:` map or a flat map of rule id to settings.
/// Entries whose value is not a map are dropped.
pub fn parse_rule_configs(text: &str, format: RuleConfigFormat) -> Result<RuleConfigs> {
    let doc: Value = match format {
        RuleConfigFormat::Yaml => serde_yaml::from_str(text).with_context(|| "parse yaml")?,
        RuleConfigFormat::Json => serde_json::from_str(text).with_context(|| "parse json")?,
    };
    let mut root = match doc {
        Value::Object(map) => map,
        Value::Null => return Ok(RuleConfigs::new()),
        _ => return Err(anyhow!("rule config must be a map of rule id to settings")),
    };
    let entries = match root.remove("rules") {
        Some(Value::Object(rules)) => rules,
        Some(other) => {
            root.insert("rules".to_string(), other);
            root
        }
        None => root,
    };

    let mut configs = RuleConfigs::new();
    for (rule_id, value) in entries {
        match value {
            Value::Object(settings) => {
                configs.insert(rule_id, settings);
            }
            _ => tracing::debug!(rule = %rule_id, "ignoring non-map rule config entry"),
        }
    }
    Ok(configs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn yaml_with_rules_key() {
        let configs = parse_rule_configs(
            "rules:\n  position:\n    tolerance: 2\n  color:\n    property: textColor\n",
            RuleConfigFormat::Yaml,
        )
        .unwrap();
        assert_eq!(configs.len(), 2);
        assert_eq!(configs["position"]["tolerance"], json!(2));
        assert_eq!(configs["color"]["property"], json!("textColor"));
    }

    #[test]
    fn flat_json_drops_non_map_entries() {
        let configs = parse_rule_configs(r#"{"size": {"tolerance": 1}, "version": 3}"#, RuleConfigFormat::Json).unwrap();
        assert_eq!(configs.keys().collect::<Vec<_>>(), ["size"]);
    }

    #[test]
    fn empty_yaml_is_no_configs() {
        assert!(parse_rule_configs("", RuleConfigFormat::Yaml).unwrap().is_empty());
    }

    #[test]
    fn scalar_document_is_rejected() {
        assert!(parse_rule_configs("42", RuleConfigFormat::Json).is_err());
    }

    #[test]
    fn unknown_extension_falls_back_to_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rules.conf");
        std::fs::write(&path, "font-size:\n  tolerance: 0.5\n").unwrap();
        let configs = load_rule_configs(&path).unwrap();
        assert_eq!(configs["font-size"]["tolerance"], json!(0.5));
        assert_eq!(RuleConfigFormat::from_path(Path::new("a.YML")), Some(RuleConfigFormat::Yaml));
    }
}
