//! Applies every rule to every mapped pair.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use parity_mapping::ComponentMapping;
use serde_json::Value;

use crate::rule::{Rule, RuleConfig, RuleConfigs, RuleInput};
use crate::types::{Delta, DeltaProperty, Severity, ValidationResult};

#[derive(Clone, Debug, Default)]
pub struct RuleExecutorOptions {
    pub rule_configs: RuleConfigs,
}

/// Runs `rules × mappings` and returns exactly one result per pair.
///
/// Mappings are ordered by (design node id, file key) and rules by id before
/// execution, so the output order does not depend on the caller's order.
/// Output is mapping-major: all rules for the first mapping, then all rules
/// for the next. Run-level mismatch lists inherit this order per screen.
/// Nothing short-circuits: a failing result, an `Err` or a panic in one rule
/// only affects that pair, which is reported as a failed result.
pub fn execute_rules(
    rules: &[Box<dyn Rule>],
    mappings: &[ComponentMapping<'_>],
    opts: &RuleExecutorOptions,
) -> Vec<ValidationResult> {
    let mut sorted_mappings: Vec<&ComponentMapping<'_>> = mappings.iter().collect();
    sorted_mappings.sort_by(|a, b| {
        let (a, b) = (&a.design.trace_ref, &b.design.trace_ref);
        a.node_id.cmp(&b.node_id).then_with(|| a.file_key.cmp(&b.file_key))
    });
    let mut sorted_rules: Vec<&dyn Rule> = rules.iter().map(|r| r.as_ref()).collect();
    sorted_rules.sort_by(|a, b| a.id().cmp(b.id()));

    let empty = RuleConfig::new();
    let mut results = Vec::with_capacity(sorted_mappings.len() * sorted_rules.len());
    for mapping in sorted_mappings {
        for &rule in &sorted_rules {
            let input = RuleInput {
                design: mapping.design,
                app: mapping.app,
                config: opts.rule_configs.get(rule.id()).unwrap_or(&empty),
            };
            results.push(run_contained(rule, &input));
        }
    }
    results
}

fn run_contained(rule: &dyn Rule, input: &RuleInput<'_>) -> ValidationResult {
    match panic::catch_unwind(AssertUnwindSafe(|| rule.execute(input))) {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => {
            tracing::warn!(rule = rule.id(), design = %input.design.trace_ref.node_id, error = %err, "rule returned an error");
            failed_execution(rule, input, err.to_string())
        }
        Err(payload) => {
            let reason = panic_reason(payload.as_ref());
            tracing::warn!(rule = rule.id(), design = %input.design.trace_ref.node_id, reason = %reason, "rule panicked");
            failed_execution(rule, input, format!("panicked: {reason}"))
        }
    }
}

fn failed_execution(rule: &dyn Rule, input: &RuleInput<'_>, reason: String) -> ValidationResult {
    let delta = Delta::exact(
        DeltaProperty::Other,
        "rule_execution",
        Value::from("completed"),
        Value::from(reason.clone()),
        false,
    );
    let message = format!("rule '{}' could not be evaluated: {}", rule.id(), reason);
    let mismatch = input.mismatch(rule, Severity::Critical, delta, message);
    input.result(rule, vec![mismatch])
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
