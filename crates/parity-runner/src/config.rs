use anyhow::{Context, Result};
use parity_core::Platform;
use parity_mapping::{ScreenMapperOptions, StrategyWeights, DEFAULT_MIN_CONFIDENCE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "parity.toml";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub project: ProjectConfig,
    pub inputs: InputsConfig,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub mapping: MappingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub evidence: EvidenceConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProjectConfig {
    pub id: String,
    #[serde(default)]
    pub platform: Platform,
}

/// Canonical JSON inputs. Relative paths are resolved against the
/// directory holding the config file.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct InputsConfig {
    pub design: String,
    pub app: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct RulesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
    /// Rule ids to run; empty runs every built-in rule.
    #[serde(default)]
    pub enabled: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MappingConfig {
    pub screen_min_confidence: f64,
    pub component_min_confidence: f64,
    pub weights: StrategyWeights,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            screen_min_confidence: DEFAULT_MIN_CONFIDENCE,
            component_min_confidence: DEFAULT_MIN_CONFIDENCE,
            weights: StrategyWeights::default(),
        }
    }
}

impl MappingConfig {
    pub fn screen_mapper_options(&self) -> ScreenMapperOptions {
        ScreenMapperOptions {
            min_confidence: self.screen_min_confidence,
            component_weights: self.weights,
            component_min_confidence: self.component_min_confidence,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: String,
    pub save_result_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "parity-output".to_string(),
            save_result_json: true,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EvidenceConfig {
    pub attach: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design_base_url: Option<String>,
}

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self {
            attach: true,
            design_base_url: None,
        }
    }
}

impl Config {
    pub fn default_for_project(project_id: &str) -> Self {
        Self {
            project: ProjectConfig {
                id: project_id.to_string(),
                platform: Platform::Android,
            },
            inputs: InputsConfig {
                design: "design.json".to_string(),
                app: "app.json".to_string(),
            },
            rules: RulesConfig {
                config_path: Some("rules.yaml".to_string()),
                enabled: vec![],
            },
            mapping: MappingConfig::default(),
            output: OutputConfig::default(),
            evidence: EvidenceConfig::default(),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: Config = toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        let s = toml::to_string_pretty(self).with_context(|| "serialize toml")?;
        std::fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    pub fn config_path(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE_NAME)
    }
}

/// Expands `~` and `${VAR}` and resolves the result against `base_dir`
/// unless it is already absolute.
pub fn resolve_path(base_dir: &Path, raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw).with_context(|| format!("expand path '{}'", raw))?;
    let path = PathBuf::from(expanded.as_ref());
    Ok(if path.is_absolute() { path } else { base_dir.join(path) })
}
