use crate::types::OutputFormat;
use anyhow::{Context, Result};
use battlecards_runtime::{App, CONFIG_FILE, Config};
use battlecards_store::LoadReport;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

pub const LOG_FILE: &str = "battlecards.log";

pub struct ExecutionContext {
    data_dir: PathBuf,
    config: OnceCell<Config>,
    pub format: OutputFormat,
}

impl ExecutionContext {
    pub fn new(data_dir: PathBuf, format: OutputFormat) -> Self {
        Self {
            data_dir,
            config: OnceCell::new(),
            format,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }

    pub fn config(&self) -> Result<&Config> {
        let path = self.config_path();
        self.config
            .get_or_try_init(|| Config::load_from(&path))
            .with_context(|| format!("Failed to load {}", path.display()))
    }

    /// Open the workspace, reporting how the document was obtained.
    pub fn open_app(&self) -> Result<(App, LoadReport)> {
        let config = self.config()?;
        Ok(App::open(&self.data_dir, config)?)
    }
}
