use crate::{Error, Result};
use battlecards_core::{expand_tilde, resolve_workspace_path};
use battlecards_store::{StoreDefaults, DEFAULT_STORAGE_KEY};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage key the document snapshot is written under.
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// JSON file used on first run. Relative paths are taken from the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Hex SHA-256 of the password; wins over `password` when both are set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_sha256: Option<String>,
    /// Fail on unresolvable paths instead of ignoring the action.
    pub strict_paths: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub subtitle: String,
    pub tab_headers: Vec<String>,
    pub row_cells: usize,
    pub cell_placeholder: String,
    pub detail_placeholder: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        StoreDefaults::default().into()
    }
}

impl From<StoreDefaults> for DefaultsConfig {
    fn from(d: StoreDefaults) -> Self {
        Self {
            subtitle: d.subtitle,
            tab_headers: d.tab_headers,
            row_cells: d.row_cells,
            cell_placeholder: d.cell_placeholder,
            detail_placeholder: d.detail_placeholder,
        }
    }
}

impl From<&DefaultsConfig> for StoreDefaults {
    fn from(d: &DefaultsConfig) -> Self {
        Self {
            subtitle: d.subtitle.clone(),
            tab_headers: d.tab_headers.clone(),
            row_cells: d.row_cells,
            cell_placeholder: d.cell_placeholder.clone(),
            detail_placeholder: d.detail_placeholder.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub seed: SeedConfig,
    pub edit: EditConfig,
    pub defaults: DefaultsConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(resolve_workspace_path(None)?.join(CONFIG_FILE))
    }

    fn validate(&self) -> Result<()> {
        if self.storage.key.trim().is_empty() {
            return Err(Error::Config("storage.key must not be empty".to_string()));
        }
        if self.defaults.row_cells == 0 {
            return Err(Error::Config("defaults.row_cells must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Seed file location, resolved against `data_dir`.
    pub fn seed_path(&self, data_dir: &Path) -> Option<PathBuf> {
        self.seed.path.as_ref().map(|p| {
            let expanded = expand_tilde(&p.to_string_lossy());
            if expanded.is_absolute() {
                expanded
            } else {
                data_dir.join(expanded)
            }
        })
    }

    pub fn store_defaults(&self) -> StoreDefaults {
        (&self.defaults).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.storage.key, "battleCardData");
        assert_eq!(config.defaults.tab_headers.len(), 3);
        assert!(!config.edit.strict_paths);
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join(CONFIG_FILE);

        let mut config = Config::default();
        config.edit.password = Some("hunter2".to_string());
        config.defaults.row_cells = 4;
        config.save_to(&config_path)?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join(CONFIG_FILE);
        std::fs::write(&config_path, "[edit]\nstrict_paths = true\n")?;

        let loaded = Config::load_from(&config_path)?;
        assert!(loaded.edit.strict_paths);
        assert_eq!(loaded.storage, StorageConfig::default());
        assert_eq!(loaded.defaults.cell_placeholder, "...");
        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = Config::load_from(&temp_dir.path().join("nonexistent.toml"))?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_invalid_values_are_rejected() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join(CONFIG_FILE);
        std::fs::write(&config_path, "[defaults]\nrow_cells = 0\n")?;
        assert!(matches!(Config::load_from(&config_path), Err(Error::Config(_))));

        std::fs::write(&config_path, "[storage\nkey = 1")?;
        assert!(matches!(
            Config::load_from(&config_path),
            Err(Error::ConfigParse(_))
        ));
        Ok(())
    }

    #[test]
    fn test_seed_path_is_relative_to_data_dir() {
        let mut config = Config::default();
        assert_eq!(config.seed_path(Path::new("/data")), None);

        config.seed.path = Some(PathBuf::from("data.json"));
        assert_eq!(
            config.seed_path(Path::new("/data")),
            Some(PathBuf::from("/data/data.json"))
        );

        config.seed.path = Some(PathBuf::from("/srv/cards.json"));
        assert_eq!(
            config.seed_path(Path::new("/data")),
            Some(PathBuf::from("/srv/cards.json"))
        );
    }
}
