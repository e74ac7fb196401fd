use serde::Deserialize;

use crate::rule::{decode_config, Rule, RuleError, RuleInput};
use crate::types::{Delta, DeltaProperty, Severity, ValidationResult};

use super::check_tolerance;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PositionRuleConfig {
    /// Pixels, applied to x and y independently.
    pub tolerance: f64,
    pub severity: Option<Severity>,
}

impl Default for PositionRuleConfig {
    fn default() -> Self {
        Self { tolerance: 4.0, severity: None }
    }
}

/// Compares the design layout origin with the app element bounds.
pub struct PositionRule;

impl Rule for PositionRule {
    fn id(&self) -> &str {
        "position"
    }

    fn name(&self) -> &str {
        "Position"
    }

    fn execute(&self, input: &RuleInput<'_>) -> Result<ValidationResult, RuleError> {
        let cfg: PositionRuleConfig = decode_config(self.id(), input.config)?;
        let tolerance = check_tolerance(self.id(), cfg.tolerance)?;
        let severity = cfg.severity.unwrap_or(Severity::Medium);

        let Some(layout) = input.design.styles.layout else {
            return Ok(input.result(self, vec![]));
        };
        let bounds = input.app.styles.bounds;

        let mut mismatches = Vec::new();
        for (axis, expected, actual) in [("x", layout.x, bounds.x), ("y", layout.y, bounds.y)] {
            let delta = Delta::numeric(DeltaProperty::Position, axis, expected, actual, tolerance);
            if !delta.within_tolerance {
                let msg = format!(
                    "{} is off by {:.1}px (design {}, app {}, tolerance {})",
                    axis,
                    (expected - actual).abs(),
                    expected,
                    actual,
                    tolerance
                );
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
    fn within_tolerance_passes() {
        let d = design(Rect::new(10.0, 20.0, 100.0, 40.0));
        let a = app(Rect::new(13.0, 16.0, 100.0, 40.0));
        let cfg = config(json!({}));
        let r = PositionRule.execute(&RuleInput { design: &d, app: &a, config: &cfg }).unwrap();
        assert!(r.passed);
    }

    #[test]
    fn each_axis_out_of_tolerance_is_a_mismatch() {
        let d = design(Rect::new(10.0, 20.0, 100.0, 40.0));
        let a = app(Rect::new(30.0, 50.0, 100.0, 40.0));
        let cfg = config(json!({ "tolerance": 5, "severity": "high" }));
        let r = PositionRule.execute(&RuleInput { design: &d, app: &a, config: &cfg }).unwrap();
        assert!(!r.passed);
        assert_eq!(r.mismatches.len(), 2);
        assert_eq!(r.mismatches[0].delta.property_name, "x");
        assert_eq!(r.mismatches[1].delta.property_name, "y");
        assert!(r.mismatches.iter().all(|m| m.severity == Severity::High));
    }

    #[test]
    fn missing_layout_passes() {
        let mut d = design(Rect::default());
        d.styles.layout = None;
        let a = app(Rect::new(500.0, 500.0, 1.0, 1.0));
        let cfg = config(json!({}));
        assert!(PositionRule.execute(&RuleInput { design: &d, app: &a, config: &cfg }).unwrap().passed);
    }

    #[test]
    fn negative_tolerance_is_invalid_config() {
        let d = design(Rect::default());
        let a = app(Rect::default());
        let cfg = config(json!({ "tolerance": -2 }));
        let err = PositionRule.execute(&RuleInput { design: &d, app: &a, config: &cfg }).unwrap_err();
        assert!(matches!(err, RuleError::InvalidConfig { .. }));
    }
}
