//! Filesystem-backed object store and status table.
//!
//! The remote backends (S3, DynamoDB) sit behind the library traits; the cli
//! ships local adapters so jobs run against a plain directory. Object keys
//! map to relative paths under the root; the status table is a single JSON
//! file keyed by `code#doc_type`.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use econodoc::services::record_key;
use econodoc::{BatchRecord, BatchStatus, Error, ObjectStore, Result, StatusStore};
use log::debug;

/// Object store rooted at a local directory.
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    /// Create a store rooted at `root`. The directory is created on first put.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl ObjectStore for LocalObjectStore {
    fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Storage(format!("{}: {}", parent.display(), e)))?;
        }
        fs::write(&path, bytes).map_err(|e| Error::Storage(format!("{}: {}", path.display(), e)))?;
        debug!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.path_for(key);
        fs::read(&path).map_err(|e| Error::Storage(format!("{}: {}", path.display(), e)))
    }
}

/// Status table persisted as one JSON file.
pub struct FileStatusStore {
    path: PathBuf,
}

impl FileStatusStore {
    /// Create a status store backed by the JSON file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<HashMap<String, BatchRecord>> {
        match fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| Error::StatusStore(format!("{}: {}", self.path.display(), e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(Error::StatusStore(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn save(&self, records: &HashMap<String, BatchRecord>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::StatusStore(format!("{}: {}", parent.display(), e)))?;
        }
        let bytes = serde_json::to_vec_pretty(records)?;
        fs::write(&self.path, bytes)
            .map_err(|e| Error::StatusStore(format!("{}: {}", self.path.display(), e)))
    }
}

impl StatusStore for FileStatusStore {
    fn put(&self, record: &BatchRecord) -> Result<()> {
        let mut records = self.load()?;
        records.insert(record.key(), record.clone());
        self.save(&records)
    }

    fn exists(&self, code: &str, doc_type: &str) -> Result<bool> {
        Ok(self.load()?.contains_key(&record_key(code, doc_type)))
    }

    fn pending_for(&self, code: &str) -> Result<Vec<BatchRecord>> {
        let mut pending: Vec<BatchRecord> = self
            .load()?
            .into_values()
            .filter(|r| r.code == code && r.status == BatchStatus::Pending)
            .collect();
        pending.sort_by(|a, b| a.key().cmp(&b.key()));
        Ok(pending)
    }

    fn update_status(&self, key: &str, status: BatchStatus) -> Result<()> {
        let mut records = self.load()?;
        let record = records
            .get_mut(key)
            .ok_or_else(|| Error::StatusStore(format!("no record under {}", key)))?;
        record.status = status;
        self.save(&records)
    }
}
