use std::collections::BTreeMap;

use parity_core::{Platform, RunId};
use parity_mapping::ScreenMapping;
use serde::{Deserialize, Serialize};

use crate::types::{Mismatch, Severity, ValidationResult};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScreenDesignRef {
    pub node_id: String,
    pub file_key: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScreenAppRef {
    pub screen_id: String,
    pub session_id: String,
}

/// All validation results of one screen mapping.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScreenValidationResult {
    pub screen_name: String,
    pub design_ref: ScreenDesignRef,
    pub app_ref: ScreenAppRef,
    pub passed: bool,
    pub results: Vec<ValidationResult>,
    pub total_mismatches: usize,
}

impl ScreenValidationResult {
    pub fn from_results(mapping: &ScreenMapping<'_>, results: Vec<ValidationResult>) -> Self {
        let design = &mapping.design.trace_ref;
        let app = &mapping.app.trace_ref;
        Self {
            screen_name: mapping.design.name.clone(),
            design_ref: ScreenDesignRef {
                node_id: design.node_id.clone(),
                file_key: design.file_key.clone(),
            },
            app_ref: ScreenAppRef {
                screen_id: app.screen_id.clone().unwrap_or_else(|| app.element_id.clone()),
                session_id: app.session_id.clone(),
            },
            passed: results.iter().all(|r| r.passed),
            total_mismatches: results.iter().map(|r| r.mismatches.len()).sum(),
            results,
        }
    }

    pub fn mismatches(&self) -> impl Iterator<Item = &Mismatch> + '_ {
        self.results.iter().flat_map(|r| r.mismatches.iter())
    }
}

/// Outcome of one end-to-end run. Reporting renders this as-is.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunValidationResult {
    pub run_id: RunId,
    /// RFC 3339, UTC.
    pub timestamp: String,
    pub platform: Platform,
    pub screen_results: Vec<ScreenValidationResult>,
    pub passed: bool,
    pub total_mismatches: usize,
    pub all_mismatches: Vec<Mismatch>,
}

impl RunValidationResult {
    pub fn validation_count(&self) -> usize {
        self.screen_results.iter().map(|s| s.results.len()).sum()
    }

    pub fn severity_counts(&self) -> BTreeMap<Severity, usize> {
        let mut counts = BTreeMap::new();
        for m in &self.all_mismatches {
            *counts.entry(m.severity).or_insert(0) += 1;
        }
        counts
    }
}
