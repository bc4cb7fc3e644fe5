//! Per-project persisted configuration, scoped to a destination root.
//!
//! One `.armaturerc.json` per root holds a flat key/value record. The record
//! loads when storage binds to a root and every mutation flushes, so a value
//! written by one invocation is visible to the next.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::application::ports::Filesystem;
use crate::error::{ArmatureResult, Context as _};

/// File name of the persisted record, also the project marker the root
/// locator searches for.
pub const STORAGE_FILE: &str = ".armaturerc.json";

/// JSON-file-backed key/value store bound to one destination root.
pub struct Storage {
    root: PathBuf,
    record: Map<String, Value>,
    fs: Arc<dyn Filesystem>,
}

impl Storage {
    /// Bind to a root, loading the existing record if one is there.
    ///
    /// An unreadable or malformed record file logs a warning and starts
    /// empty rather than failing the instantiation.
    pub fn open(root: impl Into<PathBuf>, fs: Arc<dyn Filesystem>) -> Self {
        let root = root.into();
        let path = root.join(STORAGE_FILE);
        let record = if fs.exists(&path) {
            match fs.read_file(&path) {
                Ok(raw) => match serde_json::from_str::<Map<String, Value>>(&raw) {
                    Ok(record) => record,
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "malformed storage record, starting empty");
                        Map::new()
                    }
                },
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "unreadable storage record, starting empty");
                    Map::new()
                }
            }
        } else {
            Map::new()
        };

        debug!(root = %root.display(), keys = record.len(), "storage bound");
        Self { root, record, fs }
    }

    /// The destination root this store is scoped to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the backing file.
    pub fn file_path(&self) -> PathBuf {
        self.root.join(STORAGE_FILE)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.record.get(key)
    }

    /// Write a value and flush the record.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> ArmatureResult<()> {
        self.record.insert(key.into(), value.into());
        self.save()
    }

    /// Remove a key and flush the record. Removing an absent key is a no-op
    /// that still flushes nothing new.
    pub fn delete(&mut self, key: &str) -> ArmatureResult<()> {
        if self.record.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.record.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.record.is_empty()
    }

    fn save(&self) -> ArmatureResult<()> {
        let raw = serde_json::to_string_pretty(&Value::Object(self.record.clone()))
            .context("serialize storage record")?;
        self.fs.create_dir_all(&self.root)?;
        self.fs.write_file(&self.file_path(), &raw)
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("root", &self.root)
            .field("keys", &self.record.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::error::ArmatureError;

    #[derive(Default)]
    struct FakeFs {
        files: Mutex<HashMap<PathBuf, String>>,
    }

    impl Filesystem for FakeFs {
        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }

        fn read_file(&self, path: &Path) -> ArmatureResult<String> {
            self.files.lock().unwrap().get(path).cloned().ok_or_else(|| {
                ArmatureError::Internal {
                    message: format!("no such file: {}", path.display()),
                }
            })
        }

        fn write_file(&self, path: &Path, content: &str) -> ArmatureResult<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }

        fn create_dir_all(&self, _path: &Path) -> ArmatureResult<()> {
            Ok(())
        }
    }

    #[test]
    fn set_flushes_and_get_reads_back() {
        let fs = Arc::new(FakeFs::default());
        let mut storage = Storage::open("/project", fs.clone());

        storage.set("theme", "dark").unwrap();

        assert_eq!(storage.get("theme"), Some(&json!("dark")));
        let raw = fs
            .files
            .lock()
            .unwrap()
            .get(Path::new("/project/.armaturerc.json"))
            .cloned()
            .unwrap();
        assert!(raw.contains("\"theme\""));
    }

    #[test]
    fn record_survives_a_rebind_to_the_same_root() {
        let fs = Arc::new(FakeFs::default());
        let mut storage = Storage::open("/project", fs.clone());
        storage.set("count", 3).unwrap();
        drop(storage);

        let reopened = Storage::open("/project", fs);
        assert_eq!(reopened.get("count"), Some(&json!(3)));
    }

    #[test]
    fn malformed_record_starts_empty() {
        let fs = Arc::new(FakeFs::default());
        fs.write_file(Path::new("/project/.armaturerc.json"), "{not json")
            .unwrap();

        let storage = Storage::open("/project", fs);
        assert!(storage.is_empty());
    }

    #[test]
    fn delete_removes_and_flushes() {
        let fs = Arc::new(FakeFs::default());
        let mut storage = Storage::open("/project", fs.clone());
        storage.set("a", 1).unwrap();
        storage.delete("a").unwrap();

        let reopened = Storage::open("/project", fs);
        assert_eq!(reopened.get("a"), None);
    }

    #[test]
    fn roots_do_not_share_records() {
        let fs = Arc::new(FakeFs::default());
        let mut one = Storage::open("/one", fs.clone());
        one.set("key", "one").unwrap();

        let two = Storage::open("/two", fs);
        assert_eq!(two.get("key"), None);
    }
}
