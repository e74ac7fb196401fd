use std::collections::BTreeMap;

use parity_core::{AppElement, DesignComponent};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::types::{Delta, Mismatch, Severity, ValidationResult};

/// Rule specific settings, passed through untouched.
pub type RuleConfig = serde_json::Map<String, Value>;

/// Rule id -> settings.
pub type RuleConfigs = BTreeMap<String, RuleConfig>;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid config for rule '{rule_id}': {reason}")]
    InvalidConfig { rule_id: String, reason: String },
    #[error("rule '{rule_id}' failed: {reason}")]
    Failed { rule_id: String, reason: String },
    #[error("unknown rule id: {0}")]
    UnknownRule(String),
}

/// What a rule sees: one mapped pair plus its own config.
#[derive(Clone, Copy, Debug)]
pub struct RuleInput<'a> {
    pub design: &'a DesignComponent,
    pub app: &'a AppElement,
    pub config: &'a RuleConfig,
}

/// A comparison rule. Implementations are pure: same input, same result.
pub trait Rule: Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn execute(&self, input: &RuleInput<'_>) -> Result<ValidationResult, RuleError>;
}

impl RuleInput<'_> {
    pub fn mismatch<R: Rule + ?Sized>(&self, rule: &R, severity: Severity, delta: Delta, message: impl Into<String>) -> Mismatch {
        Mismatch {
            rule_id: rule.id().to_string(),
            rule_name: rule.name().to_string(),
            design_ref: self.design.trace_ref.clone(),
            app_ref: self.app.trace_ref.clone(),
            severity,
            delta,
            message: message.into(),
        }
    }

    pub fn result<R: Rule + ?Sized>(&self, rule: &R, mismatches: Vec<Mismatch>) -> ValidationResult {
        ValidationResult::new(
            rule.id(),
            rule.name(),
            self.design.trace_ref.clone(),
            self.app.trace_ref.clone(),
            mismatches,
        )
    }
}

/// Decodes a rule's config into its typed form. Missing keys take the
/// type's defaults; unknown keys are ignored.
pub fn decode_config<T: DeserializeOwned>(rule_id: &str, config: &RuleConfig) -> Result<T, RuleError> {
    serde_json::from_value(Value::Object(config.clone())).map_err(|e| RuleError::InvalidConfig {
        rule_id: rule_id.to_string(),
        reason: e.to_string(),
    })
}
