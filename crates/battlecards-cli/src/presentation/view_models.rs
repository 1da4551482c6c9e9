//! Small result models for console commands.

use std::fmt;
use std::path::PathBuf;

use battlecards_runtime::Config;
use serde::Serialize;

/// What an `edit` command changed.
#[derive(Debug, Clone, Serialize)]
pub struct EditResultViewModel {
    pub operation: &'static str,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl EditResultViewModel {
    pub fn new(operation: &'static str, path: impl Into<String>) -> Self {
        Self {
            operation,
            path: path.into(),
            id: None,
            index: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

impl fmt::Display for EditResultViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.id, self.index) {
            (Some(id), _) => writeln!(f, "{}: {} ({})", self.operation, id, self.path),
            (None, Some(index)) => writeln!(f, "{}: {}[{}]", self.operation, self.path, index),
            (None, None) => writeln!(f, "{}: {}", self.operation, self.path),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigViewModel {
    pub path: PathBuf,
    pub exists: bool,
    pub config: Config,
}

impl ConfigViewModel {
    /// Secrets are replaced before anything is printed.
    pub fn new(path: PathBuf, exists: bool, config: &Config) -> Self {
        let mut config = config.clone();
        if config.edit.password.is_some() {
            config.edit.password = Some("********".to_string());
        }
        Self {
            path,
            exists,
            config,
        }
    }
}

impl fmt::Display for ConfigViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let note = if self.exists { "" } else { " (not found, using defaults)" };
        writeln!(f, "# {}{}", self.path.display(), note)?;
        match toml::to_string_pretty(&self.config) {
            Ok(body) => write!(f, "{}", body),
            Err(_) => Err(fmt::Error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_result_lines() {
        assert_eq!(
            EditResultViewModel::new("added tab", "acme.tabs")
                .with_id("acme-pricing-1")
                .to_string(),
            "added tab: acme-pricing-1 (acme.tabs)\n"
        );
        assert_eq!(
            EditResultViewModel::new("added row", "acme.tabs[0].content")
                .with_index(3)
                .to_string(),
            "added row: acme.tabs[0].content[3]\n"
        );
    }

    #[test]
    fn test_config_password_is_masked() {
        let mut config = Config::default();
        config.edit.password = Some("hunter2".to_string());
        let model = ConfigViewModel::new(PathBuf::from("/data/config.toml"), true, &config);

        let text = model.to_string();
        assert!(text.starts_with("# /data/config.toml\n"));
        assert!(!text.contains("hunter2"));
        assert!(text.contains("[storage]"));
    }
}
