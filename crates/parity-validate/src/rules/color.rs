use parity_core::Rgba;
use serde::Deserialize;
use serde_json::Value;

use crate::rule::{decode_config, Rule, RuleError, RuleInput};
use crate::types::{Delta, DeltaProperty, Mismatch, Severity, ValidationResult};

use super::check_tolerance;

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ColorProperty {
    BackgroundColor,
    TextColor,
    #[default]
    Both,
}

impl ColorProperty {
    fn includes(self, other: ColorProperty) -> bool {
        self == ColorProperty::Both || self == other
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorRuleConfig {
    /// Per channel, 0–255.
    pub tolerance: f64,
    pub property: ColorProperty,
    pub severity: Option<Severity>,
}

impl Default for ColorRuleConfig {
    fn default() -> Self {
        Self {
            tolerance: 8.0,
            property: ColorProperty::Both,
            severity: None,
        }
    }
}

pub struct ColorRule;

impl ColorRule {
    fn compare(
        &self,
        input: &RuleInput<'_>,
        name: &str,
        expected: Option<&Rgba>,
        actual: Option<&str>,
        tolerance: f64,
        severity: Severity,
    ) -> Option<Mismatch> {
        let (expected, raw) = (expected?, actual?);
        match Rgba::from_hex(raw) {
            Ok(actual) => {
                let distance = expected.max_channel_delta(&actual);
                if distance <= tolerance {
                    return None;
                }
                let delta = Delta {
                    tolerance: Some(tolerance),
                    ..Delta::exact(
                        DeltaProperty::Color,
                        name,
                        Value::from(expected.to_hex()),
                        Value::from(actual.to_hex()),
                        false,
                    )
                };
                let msg = format!(
                    "{} {} differs from design {} by {} per channel",
                    name,
                    actual.to_hex(),
                    expected.to_hex(),
                    distance
                );
                Some(input.mismatch(self, severity, delta, msg))
            }
            Err(e) => {
                let delta = Delta::exact(DeltaProperty::Color, name, Value::from(expected.to_hex()), Value::from(raw), false);
                Some(input.mismatch(self, severity, delta, format!("{} is not a valid color: {}", name, e)))
            }
        }
    }
}

impl Rule for ColorRule {
    fn id(&self) -> &str {
        "color"
    }

    fn name(&self) -> &str {
        "Color"
    }

    fn execute(&self, input: &RuleInput<'_>) -> Result<ValidationResult, RuleError> {
        let cfg: ColorRuleConfig = decode_config(self.id(), input.config)?;
        let tolerance = check_tolerance(self.id(), cfg.tolerance)?;
        let severity = cfg.severity.unwrap_or(Severity::Medium);
        let (design, app) = (&input.design.styles, &input.app.styles);

        let mut mismatches = Vec::new();
        if cfg.property.includes(ColorProperty::BackgroundColor) {
            mismatches.extend(self.compare(
                input,
                "backgroundColor",
                design.background_color.as_ref(),
                app.background_color.as_deref(),
                tolerance,
                severity,
            ));
        }
        if cfg.property.includes(ColorProperty::TextColor) {
            mismatches.extend(self.compare(
                input,
                "textColor",
                design.text_color.as_ref(),
                app.text_color.as_deref(),
                tolerance,
                severity,
            ));
        }
        Ok(input.result(self, mismatches))
    }
}
