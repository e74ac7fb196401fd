//! Post-hoc evidence for reporting. Every function here returns new values;
//! the results passed in are left untouched.

use parity_core::DesignTraceRef;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::aggregate::{RunValidationResult, ScreenValidationResult};
use crate::types::{EvidenceRef, ExpectedActual, ValidationResult};

pub const DEFAULT_DESIGN_BASE_URL: &str = "https://www.figma.com";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DesignReference {
    pub file_key: String,
    pub node_id: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EvidenceOptions {
    pub design_base_url: Option<String>,
    pub include_metadata: bool,
}

impl Default for EvidenceOptions {
    fn default() -> Self {
        Self {
            design_base_url: None,
            include_metadata: true,
        }
    }
}

/// Link to the design node: `<base>/file/<fileKey>?node-id=<nodeId>`.
pub fn design_reference(trace: &DesignTraceRef, base_url: Option<&str>) -> DesignReference {
    let base = base_url.unwrap_or(DEFAULT_DESIGN_BASE_URL).trim_end_matches('/');
    DesignReference {
        file_key: trace.file_key.clone(),
        node_id: trace.node_id.clone(),
        url: format!("{}/file/{}?node-id={}", base, trace.file_key, utf8_percent_encode(&trace.node_id, NODE_ID)),
        page_id: trace.page_id.clone(),
        page_name: trace.page_name.clone(),
        node_name: trace.node_name.clone(),
    }
}

/// Everything outside `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped.
const NODE_ID: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn evidence_for(result: &ValidationResult, opts: &EvidenceOptions) -> EvidenceRef {
    let first = result.mismatches.first().map(|m| &m.delta);
    let prior = result.evidence.as_ref();
    let na = || Value::from("N/A");

    let expected = first
        .map(|d| d.expected.clone())
        .or_else(|| prior.map(|e| e.expected.clone()))
        .unwrap_or_else(na);
    let actual = first
        .map(|d| d.actual.clone())
        .or_else(|| prior.map(|e| e.actual.clone()))
        .unwrap_or_else(na);
    let reference = design_reference(&result.design_ref, opts.design_base_url.as_deref());

    EvidenceRef {
        metadata: opts.include_metadata.then(|| ExpectedActual {
            expected: expected.clone(),
            actual: actual.clone(),
            property: first.map(|d| d.property_name.clone()),
        }),
        expected,
        actual,
        delta: first.cloned().or_else(|| prior.and_then(|e| e.delta.clone())),
        design_url: Some(reference.url),
        design_node_id: Some(reference.node_id),
    }
}

pub fn attach_evidence(results: &[ValidationResult], opts: &EvidenceOptions) -> Vec<ValidationResult> {
    results.iter().map(|r| r.with_evidence(evidence_for(r, opts))).collect()
}

pub fn attach_evidence_to_run(run: &RunValidationResult, opts: &EvidenceOptions) -> RunValidationResult {
    RunValidationResult {
        screen_results: run
            .screen_results
            .iter()
            .map(|s| ScreenValidationResult {
                results: attach_evidence(&s.results, opts),
                ..s.clone()
            })
            .collect(),
        ..run.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Delta, DeltaProperty, Mismatch, Severity};
    use parity_core::AppTraceRef;

    fn failed() -> ValidationResult {
        let design_ref = DesignTraceRef::new("KEY", "12:34");
        let app_ref = AppTraceRef::new("s", "e");
        let delta = Delta::numeric(DeltaProperty::Position, "x", 10.0, 30.0, 4.0);
        let m = Mismatch {
            rule_id: "position".into(),
            rule_name: "Position".into(),
            design_ref: design_ref.clone(),
            app_ref: app_ref.clone(),
            severity: Severity::Medium,
            delta,
            message: "x off".into(),
        };
        ValidationResult::new("position", "Position", design_ref, app_ref, vec![m])
    }

    #[test]
    fn node_ids_are_url_encoded() {
        let r = design_reference(&DesignTraceRef::new("KEY", "12:34"), None);
        assert_eq!(r.url, "https://www.figma.com/file/KEY?node-id=12%3A34");
        let custom = design_reference(&DesignTraceRef::new("KEY", "1"), Some("http://mirror/"));
        assert_eq!(custom.url, "http://mirror/file/KEY?node-id=1");
        let odd = design_reference(&DesignTraceRef::new("KEY", "I1;2 é/(x)"), None);
        assert_eq!(odd.url, "https://www.figma.com/file/KEY?node-id=I1%3B2%20%C3%A9%2F(x)");
    }

    #[test]
    fn evidence_comes_from_first_mismatch_and_input_is_untouched() {
        let original = vec![failed()];
        let enriched = attach_evidence(&original, &EvidenceOptions::default());
        assert!(original[0].evidence.is_none());
        let ev = enriched[0].evidence.as_ref().unwrap();
        assert_eq!(ev.expected, Value::from(10.0));
        assert_eq!(ev.actual, Value::from(30.0));
        assert_eq!(ev.design_node_id.as_deref(), Some("12:34"));
        assert_eq!(ev.metadata.as_ref().and_then(|m| m.property.as_deref()), Some("x"));
        assert_eq!(enriched[0].mismatches, original[0].mismatches);
    }

    #[test]
    fn passing_results_get_placeholder_values() {
        let passed = ValidationResult::new("size", "Size", DesignTraceRef::new("K", "1"), AppTraceRef::new("s", "e"), vec![]);
        let opts = EvidenceOptions { include_metadata: false, ..Default::default() };
        let ev = attach_evidence(&[passed], &opts).remove(0).evidence.unwrap();
        assert_eq!(ev.expected, Value::from("N/A"));
        assert!(ev.metadata.is_none());
        assert!(ev.delta.is_none());
    }
}
