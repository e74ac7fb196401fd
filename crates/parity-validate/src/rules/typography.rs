use serde::Deserialize;
use serde_json::Value;

use crate::rule::{decode_config, Rule, RuleError, RuleInput};
use crate::types::{Delta, DeltaProperty, Severity, ValidationResult};

use super::check_tolerance;

/// Families a platform may substitute when the requested one is missing.
const SYSTEM_FAMILIES: &[&str] = &[
    "system",
    "system-ui",
    "-apple-system",
    "sf pro",
    "sf pro text",
    "sf pro display",
    ".sf ui text",
    "helvetica neue",
    "roboto",
    "sans-serif",
    "noto sans",
];

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FontSizeRuleConfig {
    /// Points.
    pub tolerance: f64,
    pub severity: Option<Severity>,
}

impl Default for FontSizeRuleConfig {
    fn default() -> Self {
        Self { tolerance: 1.0, severity: None }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FontFamilyRuleConfig {
    pub case_sensitive: bool,
    pub allow_alternates: bool,
    pub severity: Option<Severity>,
}

pub struct FontSizeRule;

impl Rule for FontSizeRule {
    fn id(&self) -> &str {
        "font-size"
    }

    fn name(&self) -> &str {
        "Font Size"
    }

    fn execute(&self, input: &RuleInput<'_>) -> Result<ValidationResult, RuleError> {
        let cfg: FontSizeRuleConfig = decode_config(self.id(), input.config)?;
        let tolerance = check_tolerance(self.id(), cfg.tolerance)?;

        let Some(expected) = input.design.styles.typography.as_ref().map(|t| t.font_size) else {
            return Ok(input.result(self, vec![]));
        };
        let Some(actual) = input.app.styles.typography.as_ref().and_then(|t| t.font_size) else {
            return Ok(input.result(self, vec![]));
        };

        let delta = Delta::numeric(DeltaProperty::Typography, "fontSize", expected, actual, tolerance);
        let mismatches = if delta.within_tolerance {
            vec![]
        } else {
            let msg = format!("font size {}pt differs from design {}pt", actual, expected);
            vec![input.mismatch(self, cfg.severity.unwrap_or(Severity::Medium), delta, msg)]
        };
        Ok(input.result(self, mismatches))
    }
}

pub struct FontFamilyRule;

impl FontFamilyRule {
    fn families_match(cfg: &FontFamilyRuleConfig, expected: &str, actual: &str) -> bool {
        let (expected, actual) = (expected.trim(), actual.trim());
        let same = if cfg.case_sensitive {
            expected == actual
        } else {
            expected.eq_ignore_ascii_case(actual)
        };
        same || (cfg.allow_alternates && is_system_family(expected) && is_system_family(actual))
    }
}

fn is_system_family(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    SYSTEM_FAMILIES.contains(&lower.as_str())
}

impl Rule for FontFamilyRule {
    fn id(&self) -> &str {
        "font-family"
    }

    fn name(&self) -> &str {
        "Font Family"
    }

    fn execute(&self, input: &RuleInput<'_>) -> Result<ValidationResult, RuleError> {
        let cfg: FontFamilyRuleConfig = decode_config(self.id(), input.config)?;

        let Some(expected) = input.design.styles.typography.as_ref().map(|t| t.font_family.as_str()) else {
            return Ok(input.result(self, vec![]));
        };
        let Some(actual) = input.app.styles.typography.as_ref().and_then(|t| t.font_family.as_deref()) else {
            return Ok(input.result(self, vec![]));
        };

        let equal = Self::families_match(&cfg, expected, actual);
        let mismatches = if equal {
            vec![]
        } else {
            let delta = Delta::exact(
                DeltaProperty::Typography,
                "fontFamily",
                Value::from(expected),
                Value::from(actual),
                false,
            );
            let msg = format!("font family '{}' does not match design '{}'", actual, expected);
            vec![input.mismatch(self, cfg.severity.unwrap_or(Severity::Low), delta, msg)]
        };
        Ok(input.result(self, mismatches))
    }
}
