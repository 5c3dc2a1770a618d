//! Get/set access to the persisted base-directory override.
//!
//! The resolver and migration engine only ever see the [`SettingsStore`]
//! trait so tests can swap the settings file for an in-memory value.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::errors::SettingsError;
use crate::settings::{load_settings, save_settings, Settings};

/// Persisted configuration holding the optional base-directory override.
pub trait SettingsStore {
    fn read_override(&self) -> Result<Option<PathBuf>, SettingsError>;
    fn write_override(&self, value: Option<&Path>) -> Result<(), SettingsError>;
}

/// Settings stored as a TOML file on disk.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    fn read_override(&self) -> Result<Option<PathBuf>, SettingsError> {
        Ok(load_settings(&self.path)?.custom_base_directory)
    }

    fn write_override(&self, value: Option<&Path>) -> Result<(), SettingsError> {
        // Read-modify-write so keys owned by other parts of the app survive.
        let mut settings = load_settings(&self.path)?;
        settings.custom_base_directory = value.map(Path::to_path_buf);
        save_settings(&self.path, &settings)
    }
}

/// In-memory settings, for tests and embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: Mutex<Settings>,
}

impl MemorySettingsStore {
    pub fn new(custom_base_directory: Option<PathBuf>) -> Self {
        Self {
            settings: Mutex::new(Settings {
                custom_base_directory,
                ..Default::default()
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Settings> {
        // A poisoned lock only means another test thread panicked mid-write;
        // the value itself is still a plain Option.
        self.settings.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SettingsStore for MemorySettingsStore {
    fn read_override(&self) -> Result<Option<PathBuf>, SettingsError> {
        Ok(self.lock().custom_base_directory.clone())
    }

    fn write_override(&self, value: Option<&Path>) -> Result<(), SettingsError> {
        self.lock().custom_base_directory = value.map(Path::to_path_buf);
        Ok(())
    }
}
