pub mod config;
pub mod input;
pub mod output;
pub mod rule_config;
pub mod runner;

pub use config::*;
pub use input::*;
pub use output::*;
pub use rule_config::*;
pub use runner::*;

#[cfg(test)]
mod fixture_tests {
    use super::*;
    use std::path::{Path, PathBuf};

    fn login_fixture() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/login")
    }

    #[test]
    fn loads_login_fixture_inputs() {
        let dir = login_fixture();
        let design = load_design_document(&dir.join("design.json")).unwrap();
        let app = load_app_capture(&dir.join("app.json")).unwrap();
        assert_eq!(design.screens.len(), 1);
        assert_eq!(design.screens[0].name, "Login");
        assert_eq!(app.screens.len(), 1);
        assert_eq!(app.platform, parity_core::Platform::Android);
    }

    #[test]
    fn loads_login_fixture_rule_configs() {
        let configs = load_rule_configs(&login_fixture().join("rules.yaml")).unwrap();
        assert_eq!(configs["position"]["tolerance"], serde_json::json!(4));
        assert_eq!(configs["text-content"]["ignoreCase"], serde_json::json!(true));
    }

    #[test]
    fn loads_login_fixture_config() {
        let cfg = Config::load_from(&login_fixture().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(cfg.project.id, "login-demo");
        assert_eq!(cfg.inputs.design, "design.json");
        assert_eq!(cfg.rules.config_path.as_deref(), Some("rules.yaml"));
    }
}
