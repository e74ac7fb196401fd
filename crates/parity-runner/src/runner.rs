use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use parity_mapping::{map_screens, ScreenMapping};
use parity_validate::rules::{default_rules, rules_by_ids};
use parity_validate::{
    attach_evidence_to_run, run_comparison, ComparisonOptions, EvidenceOptions, Rule, RuleConfigs, RunValidationResult,
};
use serde::Serialize;

use crate::config::{resolve_path, Config};
use crate::input::{load_app_capture, load_design_document};
use crate::output::OutputStore;
use crate::rule_config::load_rule_configs;

const EMPTY_RULES_YAML: &str = "# Per-rule settings, keyed by rule id. See `parity rules`.\nrules: {}\n";

/// Per-invocation settings that take precedence over the config file.
#[derive(Clone, Debug, Default)]
pub struct RunOverrides {
    pub output_dir: Option<PathBuf>,
    pub parallel: bool,
}

/// How much of each side the mapper managed to pair up.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MappingStats {
    pub design_screens: usize,
    pub app_screens: usize,
    pub mapped_screens: usize,
    pub mapped_components: usize,
    pub unmapped_design_components: usize,
    pub unmapped_app_elements: usize,
}

impl MappingStats {
    fn collect(design_screens: usize, app_screens: usize, mappings: &[ScreenMapping<'_>]) -> Self {
        Self {
            design_screens,
            app_screens,
            mapped_screens: mappings.len(),
            mapped_components: mappings.iter().map(|m| m.component_mappings.len()).sum(),
            unmapped_design_components: mappings.iter().map(|m| m.unmapped_design.len()).sum(),
            unmapped_app_elements: mappings.iter().map(|m| m.unmapped_app.len()).sum(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RunnerResult {
    pub run: RunValidationResult,
    pub mapping: MappingStats,
    pub result_path: Option<PathBuf>,
}

pub struct Runner {
    /// Directory holding the config file; relative paths resolve from here.
    pub base_dir: PathBuf,
    pub cfg: Config,
}

impl Runner {
    pub fn open(config_path: &Path) -> Result<Self> {
        let cfg = Config::load_from(config_path)?;
        let base_dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self { base_dir, cfg })
    }

    /// Writes a default config into `dir` unless one is already there, plus
    /// an empty rules file at the configured rules path if that is missing.
    /// Returns the config path.
    pub fn init(dir: &Path) -> Result<PathBuf> {
        let cfg_path = Config::config_path(dir);
        let cfg = if cfg_path.exists() {
            tracing::info!(path = %cfg_path.display(), "config already present");
            Config::load_from(&cfg_path)?
        } else {
            let project_id = dir
                .canonicalize()
                .ok()
                .and_then(|p| p.file_name().and_then(|s| s.to_str()).map(str::to_string))
                .unwrap_or_else(|| "parity".to_string());
            let cfg = Config::default_for_project(&project_id);
            cfg.save_to(&cfg_path)?;
            tracing::info!(path = %cfg_path.display(), "wrote default config");
            cfg
        };

        if let Some(raw) = &cfg.rules.config_path {
            let rules_path = resolve_path(dir, raw)?;
            if !rules_path.exists() {
                if let Some(parent) = rules_path.parent() {
                    std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
                }
                std::fs::write(&rules_path, EMPTY_RULES_YAML)
                    .with_context(|| format!("write {}", rules_path.display()))?;
                tracing::info!(path = %rules_path.display(), "wrote empty rule config");
            }
        }
        Ok(cfg_path)
    }

    fn resolve(&self, raw: &str) -> Result<PathBuf> {
        resolve_path(&self.base_dir, raw)
    }

    fn rule_configs(&self) -> Result<RuleConfigs> {
        match &self.cfg.rules.config_path {
            Some(raw) => load_rule_configs(&self.resolve(raw)?),
            None => Ok(RuleConfigs::new()),
        }
    }

    fn rules(&self) -> Result<Vec<Box<dyn Rule>>> {
        if self.cfg.rules.enabled.is_empty() {
            return Ok(default_rules());
        }
        rules_by_ids(self.cfg.rules.enabled.as_slice()).with_context(|| "resolve [rules] enabled")
    }

    pub fn output_store(&self, overrides: &RunOverrides) -> Result<OutputStore> {
        let root = match &overrides.output_dir {
            Some(dir) => dir.clone(),
            None => self.resolve(&self.cfg.output.dir)?,
        };
        Ok(OutputStore::new(root))
    }

    /// Loads inputs, maps screens, runs every rule, then optionally attaches
    /// evidence and writes `result.json`.
    pub fn run(&self, overrides: &RunOverrides) -> Result<RunnerResult> {
        let design = load_design_document(&self.resolve(&self.cfg.inputs.design)?)?;
        let app = load_app_capture(&self.resolve(&self.cfg.inputs.app)?)?;
        if app.platform != self.cfg.project.platform {
            tracing::warn!(
                configured = self.cfg.project.platform.as_str(),
                captured = app.platform.as_str(),
                "app capture platform differs from project platform"
            );
        }
        let rule_configs = self.rule_configs()?;
        let rules = self.rules()?;

        let mappings = map_screens(&design.screens, &app.screens, &self.cfg.mapping.screen_mapper_options());
        let stats = MappingStats::collect(design.screens.len(), app.screens.len(), &mappings);
        tracing::info!(
            project = %self.cfg.project.id,
            screens = stats.mapped_screens,
            components = stats.mapped_components,
            "mapped design to app"
        );

        let opts = ComparisonOptions {
            rule_configs,
            run_id: None,
            platform: self.cfg.project.platform,
            parallel: overrides.parallel,
        };
        let mut run = run_comparison(&rules, &mappings, &opts);

        if self.cfg.evidence.attach {
            let evidence_opts = EvidenceOptions {
                design_base_url: self.cfg.evidence.design_base_url.clone(),
                ..EvidenceOptions::default()
            };
            run = attach_evidence_to_run(&run, &evidence_opts);
        }

        let result_path = if self.cfg.output.save_result_json {
            let path = self.output_store(overrides)?.write_result(&run)?;
            tracing::info!(path = %path.display(), "wrote result");
            Some(path)
        } else {
            None
        };

        Ok(RunnerResult {
            run,
            mapping: stats,
            result_path,
        })
    }
}
