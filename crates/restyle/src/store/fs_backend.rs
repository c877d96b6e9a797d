use super::backend::StorageBackend;
use crate::error::{RestyleError, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::debug;
use uuid::Uuid;

pub const DEFAULT_DATA_FILE: &str = "rules.json";

/// Filesystem backend: one JSON document mapping domain key → raw value.
///
/// Every write reloads the document, changes one key and replaces the file
/// atomically (write to tmp then rename). The whole read-modify-write runs
/// under `io_lock`, so writes to different keys from different threads never
/// clobber each other.
pub struct FsBackend {
    root: PathBuf,
    file_name: String,
    io_lock: Mutex<()>,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            file_name: DEFAULT_DATA_FILE.to_string(),
            io_lock: Mutex::new(()),
        }
    }

    pub fn with_file_name(mut self, name: &str) -> Self {
        self.file_name = name.to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_file(&self) -> PathBuf {
        self.root.join(&self.file_name)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(RestyleError::Io)?;
        }
        Ok(())
    }

    fn load(&self) -> Result<BTreeMap<String, Value>> {
        let data_file = self.data_file();
        if !data_file.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&data_file).map_err(RestyleError::Io)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let items: BTreeMap<String, Value> =
            serde_json::from_str(&content).map_err(RestyleError::Serialization)?;
        Ok(items)
    }

    fn save(&self, items: &BTreeMap<String, Value>) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(items).map_err(RestyleError::Serialization)?;

        // Atomic write
        let tmp_file = self.root.join(format!(".rules-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(RestyleError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, self.data_file()) {
            let _ = fs::remove_file(&tmp_file);
            return Err(RestyleError::Io(e));
        }

        debug!(file = %self.data_file().display(), keys = items.len(), "rules file written");
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let _io = self.io_lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load()?.remove(key))
    }

    fn get_all(&self) -> Result<BTreeMap<String, Value>> {
        let _io = self.io_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.load()
    }

    fn set(&self, key: &str, value: &Value) -> Result<()> {
        let _io = self.io_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut items = self.load()?;
        items.insert(key.to_string(), value.clone());
        self.save(&items)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _io = self.io_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut items = self.load()?;
        if items.remove(key).is_some() {
            self.save(&items)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn tmp_files(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "tmp"))
            .collect()
    }

    #[test]
    fn failed_rename_leaves_no_tmp_file() {
        let temp = TempDir::new().unwrap();
        let backend = FsBackend::new(temp.path().to_path_buf());
        // A non-empty directory where the data file should be blocks the rename.
        fs::create_dir(backend.data_file()).unwrap();
        fs::write(backend.data_file().join("keep"), "x").unwrap();

        let mut items = BTreeMap::new();
        items.insert("a.com".to_string(), json!([]));

        assert!(matches!(backend.save(&items), Err(RestyleError::Io(_))));
        assert!(tmp_files(temp.path()).is_empty());
    }

    #[test]
    fn successful_save_leaves_only_the_data_file() {
        let temp = TempDir::new().unwrap();
        let backend = FsBackend::new(temp.path().to_path_buf());

        backend.set("a.com", &json!("p{}")).unwrap();

        assert!(tmp_files(temp.path()).is_empty());
        assert_eq!(backend.get("a.com").unwrap(), Some(json!("p{}")));
    }
}
