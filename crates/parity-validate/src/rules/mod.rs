//! Built-in comparison rules and the catalog used to look them up by id.

mod color;
mod position;
mod size;
mod text_content;
mod typography;

pub use color::{ColorProperty, ColorRule, ColorRuleConfig};
pub use position::{PositionRule, PositionRuleConfig};
pub use size::{SizeRule, SizeRuleConfig};
pub use text_content::{TextContentRule, TextContentRuleConfig};
pub use typography::{FontFamilyRule, FontFamilyRuleConfig, FontSizeRule, FontSizeRuleConfig};

use serde::Serialize;

use crate::rule::{Rule, RuleError};

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RuleDescriptor {
    pub rule_id: &'static str,
    pub rule_name: &'static str,
    pub config_schema: &'static str,
}

pub const RULE_CATALOG: &[RuleDescriptor] = &[
    RuleDescriptor { rule_id: "position", rule_name: "Position", config_schema: "PositionRuleConfig" },
    RuleDescriptor { rule_id: "size", rule_name: "Size", config_schema: "SizeRuleConfig" },
    RuleDescriptor { rule_id: "font-size", rule_name: "Font Size", config_schema: "FontSizeRuleConfig" },
    RuleDescriptor { rule_id: "font-family", rule_name: "Font Family", config_schema: "FontFamilyRuleConfig" },
    RuleDescriptor { rule_id: "color", rule_name: "Color", config_schema: "ColorRuleConfig" },
    RuleDescriptor { rule_id: "text-content", rule_name: "Text Content", config_schema: "TextContentRuleConfig" },
];

pub fn rule_by_id(id: &str) -> Option<Box<dyn Rule>> {
    let rule: Box<dyn Rule> = match id {
        "position" => Box::new(PositionRule),
        "size" => Box::new(SizeRule),
        "font-size" => Box::new(FontSizeRule),
        "font-family" => Box::new(FontFamilyRule),
        "color" => Box::new(ColorRule),
        "text-content" => Box::new(TextContentRule),
        _ => return None,
    };
    Some(rule)
}

/// Every catalog rule, in catalog order.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    RULE_CATALOG.iter().filter_map(|d| rule_by_id(d.rule_id)).collect()
}

/// Builds the named rules. The first unknown id is an error.
pub fn rules_by_ids<S: AsRef<str>>(ids: &[S]) -> Result<Vec<Box<dyn Rule>>, RuleError> {
    ids.iter()
        .map(|id| rule_by_id(id.as_ref()).ok_or_else(|| RuleError::UnknownRule(id.as_ref().to_string())))
        .collect()
}

fn check_tolerance(rule_id: &str, tolerance: f64) -> Result<f64, RuleError> {
    if tolerance.is_finite() && tolerance >= 0.0 {
        Ok(tolerance)
    } else {
        Err(RuleError::InvalidConfig {
            rule_id: rule_id.to_string(),
            reason: format!("tolerance must be a non-negative number, got {}", tolerance),
        })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use parity_core::{AppElement, AppTraceRef, ComponentType, DesignComponent, DesignTraceRef, Rect};
    use serde_json::Value;

    use crate::rule::RuleConfig;

    pub fn design(layout: Rect) -> DesignComponent {
        let mut d = DesignComponent::new(DesignTraceRef::new("FILE", "1:2"), ComponentType::Text);
        d.styles.layout = Some(layout);
        d
    }

    pub fn app(bounds: Rect) -> AppElement {
        let mut a = AppElement::new(AppTraceRef::new("session", "el-1"), ComponentType::Text);
        a.styles.bounds = bounds;
        a
    }

    pub fn config(value: Value) -> RuleConfig {
        match value {
            Value::Object(map) => map,
            _ => RuleConfig::new(),
        }
    }
}
