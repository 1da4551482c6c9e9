//! Seed sources for first-run initialisation.

use crate::StoreError;
use battlecards_types::Document;
use std::borrow::Cow;
use std::path::PathBuf;

/// Document shipped with the binary, used when no seed file is configured.
pub const DEFAULT_SEED: &str = include_str!("../seed/battlecards.json");

/// Where the first document comes from when storage is empty.
pub trait SeedSource {
    fn fetch(&self) -> Result<Document, StoreError>;

    fn describe(&self) -> String;
}

/// A JSON document on disk.
#[derive(Debug, Clone)]
pub struct FileSeed {
    path: PathBuf,
}

impl FileSeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SeedSource for FileSeed {
    fn fetch(&self) -> Result<Document, StoreError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| StoreError::SeedLoad {
            source_name: self.describe(),
            reason: e.to_string(),
        })?;
        Document::from_json_str(&text).map_err(|e| StoreError::SeedLoad {
            source_name: self.describe(),
            reason: e.to_string(),
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A seed held in memory.
#[derive(Debug, Clone)]
pub struct StaticSeed {
    name: String,
    text: Cow<'static, str>,
}

impl StaticSeed {
    pub fn new(name: impl Into<String>, text: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn embedded() -> Self {
        Self::new("embedded seed", DEFAULT_SEED)
    }
}

impl SeedSource for StaticSeed {
    fn fetch(&self) -> Result<Document, StoreError> {
        Document::from_json_str(&self.text).map_err(|e| StoreError::SeedLoad {
            source_name: self.name.clone(),
            reason: e.to_string(),
        })
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}
