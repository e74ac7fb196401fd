use anyhow::{Context, Result};
use parity_core::RunId;
use parity_validate::RunValidationResult;
use std::path::{Path, PathBuf};

pub const RESULT_FILE_NAME: &str = "result.json";

/// Per-run output directories: `<root>/<runId>/`.
#[derive(Clone, Debug)]
pub struct OutputStore {
    pub root: PathBuf,
}

impl OutputStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn run_dir(&self, run_id: &RunId) -> PathBuf {
        self.root.join(run_id.as_str())
    }

    pub fn create_run_dir(&self, run_id: &RunId) -> Result<PathBuf> {
        let dir = self.run_dir(run_id);
        std::fs::create_dir_all(&dir).with_context(|| format!("create run dir {}", dir.display()))?;
        Ok(dir)
    }

    /// Writes the run as pretty JSON and returns the file path.
    pub fn write_result(&self, run: &RunValidationResult) -> Result<PathBuf> {
        let dir = self.create_run_dir(&run.run_id)?;
        let path = dir.join(RESULT_FILE_NAME);
        let bytes = serde_json::to_vec_pretty(run).with_context(|| "serialize run result")?;
        std::fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    pub fn read_result(path: &Path) -> Result<RunValidationResult> {
        let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
    }
}
