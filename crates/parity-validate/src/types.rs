use parity_core::{AppTraceRef, DesignTraceRef};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered most to least serious, so sorting puts critical first.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Info => "info",
        }
    }
}

/// What kind of property a delta compares.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DeltaProperty {
    Position,
    Size,
    Typography,
    Color,
    Spacing,
    Visibility,
    Text,
    Layout,
    Other,
}

/// One compared property: design value vs app value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Delta {
    pub property_type: DeltaProperty,
    pub property_name: String,
    pub expected: Value,
    pub actual: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
    pub within_tolerance: bool,
}

impl Delta {
    /// Numeric comparison; within tolerance when `|expected - actual| <= tolerance`.
    pub fn numeric(property_type: DeltaProperty, name: impl Into<String>, expected: f64, actual: f64, tolerance: f64) -> Self {
        Self {
            property_type,
            property_name: name.into(),
            expected: Value::from(expected),
            actual: Value::from(actual),
            tolerance: Some(tolerance),
            within_tolerance: (expected - actual).abs() <= tolerance,
        }
    }

    /// Exact comparison of two values with no tolerance.
    pub fn exact(property_type: DeltaProperty, name: impl Into<String>, expected: Value, actual: Value, equal: bool) -> Self {
        Self {
            property_type,
            property_name: name.into(),
            expected,
            actual,
            tolerance: None,
            within_tolerance: equal,
        }
    }
}

/// A failed comparison, traceable to the rule and to both nodes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Mismatch {
    pub rule_id: String,
    pub rule_name: String,
    pub design_ref: DesignTraceRef,
    pub app_ref: AppTraceRef,
    pub severity: Severity,
    pub delta: Delta,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExpectedActual {
    pub expected: Value,
    pub actual: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}

/// Evidence attached to a result for reporting.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceRef {
    pub expected: Value,
    pub actual: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<Delta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_node_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ExpectedActual>,
}

/// Outcome of one rule applied to one mapped pair. `passed` holds exactly
/// when `mismatches` is empty.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub passed: bool,
    pub design_ref: DesignTraceRef,
    pub app_ref: AppTraceRef,
    pub rule_id: String,
    pub rule_name: String,
    pub mismatches: Vec<Mismatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<EvidenceRef>,
}

impl ValidationResult {
    pub fn new(
        rule_id: impl Into<String>,
        rule_name: impl Into<String>,
        design_ref: DesignTraceRef,
        app_ref: AppTraceRef,
        mismatches: Vec<Mismatch>,
    ) -> Self {
        Self {
            passed: mismatches.is_empty(),
            design_ref,
            app_ref,
            rule_id: rule_id.into(),
            rule_name: rule_name.into(),
            mismatches,
            evidence: None,
        }
    }

    /// Copy of this result with `evidence` attached.
    pub fn with_evidence(&self, evidence: EvidenceRef) -> Self {
        Self {
            evidence: Some(evidence),
            ..self.clone()
        }
    }
}
