use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::apps::AppRecord;
use crate::errors::StoreError;
use crate::fs_op::helpers::atomic_write;

/// Read access to the app records.
pub trait AppStore {
    /// All known apps, newest-created first.
    fn list_apps(&self) -> Result<Vec<AppRecord>, StoreError>;
}

fn newest_first(mut apps: Vec<AppRecord>) -> Vec<AppRecord> {
    apps.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    apps
}

/// App records kept as a JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonAppStore {
    path: PathBuf,
}

impl JsonAppStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<AppRecord>, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&text).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    /// Register a new app. Paths must be unique.
    pub fn add_app(&self, record: AppRecord) -> Result<(), StoreError> {
        let mut apps = self.load()?;
        if apps.iter().any(|a| a.path == record.path) {
            return Err(StoreError::Duplicate(record.path));
        }
        apps.push(record);
        let text = serde_json::to_vec_pretty(&apps).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        atomic_write(&self.path, &text).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl AppStore for JsonAppStore {
    fn list_apps(&self) -> Result<Vec<AppRecord>, StoreError> {
        Ok(newest_first(self.load()?))
    }
}

/// In-memory app records for tests and embedders.
#[derive(Debug, Default)]
pub struct MemoryAppStore {
    apps: Mutex<Vec<AppRecord>>,
}

impl MemoryAppStore {
    pub fn new(apps: Vec<AppRecord>) -> Self {
        Self {
            apps: Mutex::new(apps),
        }
    }
}

impl AppStore for MemoryAppStore {
    fn list_apps(&self) -> Result<Vec<AppRecord>, StoreError> {
        let apps = self.apps.lock().unwrap_or_else(|e| e.into_inner()).clone();
        Ok(newest_first(apps))
    }
}
