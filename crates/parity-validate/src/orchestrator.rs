use chrono::{SecondsFormat, Utc};
use parity_core::{Platform, RunId};
use parity_mapping::ScreenMapping;

use crate::aggregate::{RunValidationResult, ScreenValidationResult};
use crate::executor::{execute_rules, RuleExecutorOptions};
use crate::rule::{Rule, RuleConfigs};

#[derive(Clone, Debug, Default)]
pub struct ComparisonOptions {
    pub rule_configs: RuleConfigs,
    /// Generated with [`RunId::generate`] when absent.
    pub run_id: Option<RunId>,
    pub platform: Platform,
    /// Execute each screen on its own scoped thread. Output is identical to
    /// the sequential path.
    pub parallel: bool,
}

/// Runs every rule over every screen mapping and aggregates the run.
///
/// Screens are processed in design node id order; the flattened mismatch
/// list follows screen, then mapping, then rule order.
pub fn run_comparison(
    rules: &[Box<dyn Rule>],
    screen_mappings: &[ScreenMapping<'_>],
    opts: &ComparisonOptions,
) -> RunValidationResult {
    let run_id = opts.run_id.clone().unwrap_or_else(RunId::generate);
    let exec = RuleExecutorOptions {
        rule_configs: opts.rule_configs.clone(),
    };
    let exec_opts = &exec;

    let mut sorted: Vec<&ScreenMapping<'_>> = screen_mappings.iter().collect();
    sorted.sort_by(|a, b| a.design.trace_ref.node_id.cmp(&b.design.trace_ref.node_id));

    tracing::info!(run_id = %run_id, screens = sorted.len(), rules = rules.len(), parallel = opts.parallel, "running comparison");

    let per_screen: Vec<_> = if opts.parallel {
        std::thread::scope(|scope| {
            let handles: Vec<_> = sorted
                .iter()
                .map(|&mapping| scope.spawn(move || execute_rules(rules, &mapping.component_mappings, exec_opts)))
                .collect();
            // Joined in spawn order, which is the sorted screen order.
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|payload| std::panic::resume_unwind(payload)))
                .collect()
        })
    } else {
        sorted
            .iter()
            .map(|mapping| execute_rules(rules, &mapping.component_mappings, exec_opts))
            .collect()
    };

    let screen_results: Vec<ScreenValidationResult> = sorted
        .iter()
        .zip(per_screen)
        .map(|(mapping, results)| ScreenValidationResult::from_results(mapping, results))
        .collect();

    let all_mismatches: Vec<_> = screen_results.iter().flat_map(|s| s.mismatches().cloned()).collect();
    let passed = screen_results.iter().all(|s| s.passed);

    tracing::info!(run_id = %run_id, passed, mismatches = all_mismatches.len(), "comparison finished");

    RunValidationResult {
        run_id,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        platform: opts.platform,
        passed,
        total_mismatches: all_mismatches.len(),
        all_mismatches,
        screen_results,
    }
}
