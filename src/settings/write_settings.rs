use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::SettingsError;
use crate::fs_op::helpers::atomic_write;

/// Persisted user settings.
///
/// Only the base-directory override is owned by this crate. Any other keys
/// found in the file are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(
        rename = "customBaseDirectory",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_base_directory: Option<PathBuf>,

    #[serde(flatten)]
    pub extra: toml::Table,
}

/// Serialize `settings` as TOML and write it atomically to `path`.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    let text = toml::to_string_pretty(settings)?;
    atomic_write(path, text.as_bytes()).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_camel_case_key() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("settings.toml");
        let settings = Settings {
            custom_base_directory: Some(PathBuf::from("/srv/apps")),
            ..Default::default()
        };
        save_settings(&path, &settings).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("customBaseDirectory = \"/srv/apps\""), "{}", text);
    }

    #[test]
    fn cleared_override_is_omitted() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("settings.toml");
        save_settings(&path, &Settings::default()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains("customBaseDirectory"));
    }
}
