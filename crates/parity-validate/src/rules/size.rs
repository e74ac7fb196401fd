use serde::Deserialize;

use crate::rule::{decode_config, Rule, RuleError, RuleInput};
use crate::types::{Delta, DeltaProperty, Severity, ValidationResult};

use super::check_tolerance;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SizeRuleConfig {
    pub tolerance: f64,
    pub validate_width: bool,
    pub validate_height: bool,
    pub severity: Option<Severity>,
}

impl Default for SizeRuleConfig {
    fn default() -> Self {
        Self {
            tolerance: 4.0,
            validate_width: true,
            validate_height: true,
            severity: None,
        }
    }
}

pub struct SizeRule;

impl Rule for SizeRule {
    fn id(&self) -> &str {
        "size"
    }

    fn name(&self) -> &str {
        "Size"
    }

    fn execute(&self, input: &RuleInput<'_>) -> Result<ValidationResult, RuleError> {
        let cfg: SizeRuleConfig = decode_config(self.id(), input.config)?;
        let tolerance = check_tolerance(self.id(), cfg.tolerance)?;
        let severity = cfg.severity.unwrap_or(Severity::Medium);

        let Some(layout) = input.design.styles.layout else {
            return Ok(input.result(self, vec![]));
        };
        let bounds = input.app.styles.bounds;

        let checks = [
            (cfg.validate_width, "width", layout.width, bounds.width),
            (cfg.validate_height, "height", layout.height, bounds.height),
        ];
        let mut mismatches = Vec::new();
        for (_, dimension, expected, actual) in checks.into_iter().filter(|c| c.0) {
            let delta = Delta::numeric(DeltaProperty::Size, dimension, expected, actual, tolerance);
            if !delta.within_tolerance {
                let msg = format!("{} is {} in the app but {} in the design", dimension, actual, expected);
                mismatches.push(input.mismatch(self, severity, delta, msg));
            }
        }
        Ok(input.result(self, mismatches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::fixtures::{app, config, design};
    use parity_core::Rect;
    use serde_json::json;

    #[test]
    fn width_and_height_are_checked_by_default() {
        let d = design(Rect::new(0.0, 0.0, 100.0, 40.0));
        let a = app(Rect::new(0.0, 0.0, 120.0, 30.0));
        let cfg = config(json!({}));
        let r = SizeRule.execute(&RuleInput { design: &d, app: &a, config: &cfg }).unwrap();
        let names: Vec<_> = r.mismatches.iter().map(|m| m.delta.property_name.as_str()).collect();
        assert_eq!(names, ["width", "height"]);
        assert_eq!(r.mismatches[0].delta.property_type, DeltaProperty::Size);
    }

    #[test]
    fn disabled_dimension_is_skipped() {
        let d = design(Rect::new(0.0, 0.0, 100.0, 40.0));
        let a = app(Rect::new(0.0, 0.0, 120.0, 40.0));
        let cfg = config(json!({ "validateWidth": false }));
        assert!(SizeRule.execute(&RuleInput { design: &d, app: &a, config: &cfg }).unwrap().passed);
    }

    #[test]
    fn boundary_difference_equal_to_tolerance_passes() {
        let d = design(Rect::new(0.0, 0.0, 100.0, 40.0));
        let a = app(Rect::new(0.0, 0.0, 104.0, 36.0));
        let cfg = config(json!({ "tolerance": 4 }));
        assert!(SizeRule.execute(&RuleInput { design: &d, app: &a, config: &cfg }).unwrap().passed);
    }
}
