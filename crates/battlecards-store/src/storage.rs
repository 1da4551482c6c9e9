//! Durable key/value storage for document snapshots.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Local storage: string values under string keys.
pub trait Storage {
    fn get_item(&self, key: &str) -> io::Result<Option<String>>;

    fn set_item(&mut self, key: &str, value: &str) -> io::Result<()>;

    fn remove_item(&mut self, key: &str) -> io::Result<()>;

    /// Human-readable location, used in logs.
    fn describe(&self) -> String;
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn item_path(&self, key: &str) -> io::Result<PathBuf> {
        if key.is_empty() || key.contains(&['/', '\\'][..]) || key.starts_with('.') {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid storage key '{}'", key),
            ));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.item_path(key)?) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> io::Result<()> {
        let path = self.item_path(key)?;
        std::fs::create_dir_all(&self.dir)?;

        // Write then rename so a crash never leaves a half-written snapshot.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)
    }

    fn remove_item(&mut self, key: &str) -> io::Result<()> {
        match std::fs::remove_file(self.item_path(key)?) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

/// In-process storage. Clones share the same items, so a second store built
/// from a clone sees what the first one persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(self, key: &str, value: &str) -> Self {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn peek(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.peek(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> io::Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_round_trip() -> io::Result<()> {
        let temp_dir = TempDir::new()?;
        let mut storage = FileStorage::new(temp_dir.path().join("storage"));

        assert_eq!(storage.get_item("battleCardData")?, None);
        storage.set_item("battleCardData", "{}")?;
        assert_eq!(storage.get_item("battleCardData")?, Some("{}".to_string()));
        assert!(temp_dir.path().join("storage/battleCardData.json").exists());

        storage.remove_item("battleCardData")?;
        assert_eq!(storage.get_item("battleCardData")?, None);
        storage.remove_item("battleCardData")?;
        Ok(())
    }

    #[test]
    fn test_file_storage_rejects_path_like_keys() {
        let storage = FileStorage::new("/tmp/unused");
        assert!(storage.item_path("../escape").is_err());
        assert!(storage.item_path("").is_err());
    }

    #[test]
    fn test_memory_storage_clones_share_items() -> io::Result<()> {
        let storage = MemoryStorage::new();
        let mut writer = storage.clone();
        writer.set_item("k", "v")?;
        assert_eq!(storage.peek("k"), Some("v".to_string()));
        Ok(())
    }
}
