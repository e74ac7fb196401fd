use serde::Deserialize;
use serde_json::Value;

use crate::rule::{decode_config, Rule, RuleError, RuleInput};
use crate::types::{Delta, DeltaProperty, Severity, ValidationResult};

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TextContentRuleConfig {
    /// When false, the app text only has to contain the design text.
    pub exact_match: bool,
    pub trim_whitespace: bool,
    pub ignore_case: bool,
    pub severity: Option<Severity>,
}

impl Default for TextContentRuleConfig {
    fn default() -> Self {
        Self {
            exact_match: true,
            trim_whitespace: true,
            ignore_case: false,
            severity: None,
        }
    }
}

impl TextContentRuleConfig {
    fn normalize(&self, s: &str) -> String {
        let s = if self.trim_whitespace { s.trim() } else { s };
        if self.ignore_case {
            s.to_lowercase()
        } else {
            s.to_string()
        }
    }
}

pub struct TextContentRule;

impl Rule for TextContentRule {
    fn id(&self) -> &str {
        "text-content"
    }

    fn name(&self) -> &str {
        "Text Content"
    }

    fn execute(&self, input: &RuleInput<'_>) -> Result<ValidationResult, RuleError> {
        let cfg: TextContentRuleConfig = decode_config(self.id(), input.config)?;

        let Some(expected) = input.design.text.as_deref() else {
            return Ok(input.result(self, vec![]));
        };
        // Missing app text is compared as empty.
        let actual = input.app.text.as_deref().unwrap_or("");

        let (e, a) = (cfg.normalize(expected), cfg.normalize(actual));
        let equal = if cfg.exact_match { e == a } else { a.contains(&e) };
        let mismatches = if equal {
            vec![]
        } else {
            let delta = Delta::exact(DeltaProperty::Text, "text", Value::from(expected), Value::from(actual), false);
            let msg = format!("text '{}' does not match design '{}'", actual, expected);
            vec![input.mismatch(self, cfg.severity.unwrap_or(Severity::High), delta, msg)]
        };
        Ok(input.result(self, mismatches))
    }
}
