use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-created app as known to the app-record store.
///
/// `path` is either absolute (portable, never migrated) or relative to the
/// resolved base directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppRecord {
    pub path: String,
    pub created_at: DateTime<Utc>,
}

impl AppRecord {
    pub fn new(path: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            path: path.into(),
            created_at,
        }
    }

    /// Whether the stored path is relative to the base directory.
    pub fn is_relative(&self) -> bool {
        !Path::new(&self.path).is_absolute()
    }
}

/// Where an app lives on disk: absolute paths are returned unchanged,
/// relative paths are joined onto `base`.
pub fn resolve_app_path(base: &Path, app_path: &str) -> PathBuf {
    let p = Path::new(app_path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}
