//! The operations exposed to UI and CLI callers.
//!
//! Callers must serialize `set_base_directory` calls; nothing here guards
//! against two migrations running at once.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::apps::{resolve_app_path, AppStore};
use crate::base_dir::migrate::{Migration, MigrationReport};
use crate::base_dir::picker::DirectoryPicker;
use crate::base_dir::resolver::resolve_base_directory;
use crate::errors::BaseDirError;
use crate::fs_op::stat::is_dir;
use crate::fs_op::symlink::LinkCreator;
use crate::settings::SettingsStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseDirectoryInfo {
    pub path: PathBuf,
    /// True iff the resolved path differs from the fixed default.
    pub is_custom: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectorySelection {
    pub path: Option<PathBuf>,
    pub canceled: bool,
}

pub struct BaseDirService<S, A> {
    default_path: PathBuf,
    settings: S,
    apps: A,
    linker: LinkCreator,
}

impl<S: SettingsStore, A: AppStore> BaseDirService<S, A> {
    pub fn new(default_path: impl Into<PathBuf>, settings: S, apps: A) -> Self {
        Self {
            default_path: default_path.into(),
            settings,
            apps,
            linker: LinkCreator::for_platform(),
        }
    }

    pub fn with_link_creator(mut self, linker: LinkCreator) -> Self {
        self.linker = linker;
        self
    }

    pub fn default_path(&self) -> &Path {
        &self.default_path
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    pub fn apps(&self) -> &A {
        &self.apps
    }

    /// The effective base directory. May clear a stale override.
    pub fn base_directory(&self) -> PathBuf {
        resolve_base_directory(&self.default_path, &self.settings)
    }

    pub fn get_base_directory_info(&self) -> BaseDirectoryInfo {
        let path = self.base_directory();
        let is_custom = path != self.default_path;
        BaseDirectoryInfo { path, is_custom }
    }

    /// Ask `picker` for a folder and keep the answer only if it is an
    /// existing directory.
    pub fn select_and_validate_directory(
        &self,
        picker: &dyn DirectoryPicker,
    ) -> io::Result<DirectorySelection> {
        let Some(path) = picker.pick_directory()? else {
            return Ok(DirectorySelection {
                path: None,
                canceled: true,
            });
        };

        if is_dir(&path) {
            Ok(DirectorySelection {
                path: Some(path),
                canceled: false,
            })
        } else {
            tracing::debug!("picked path {} is not a directory", path.display());
            Ok(DirectorySelection {
                path: None,
                canceled: false,
            })
        }
    }

    /// Switch the base directory to `new_base`, or back to the default when
    /// `None`, linking every relative-path app into it first.
    pub fn set_base_directory(
        &self,
        new_base: Option<&Path>,
    ) -> Result<MigrationReport, BaseDirError> {
        Migration {
            default_path: &self.default_path,
            settings: &self.settings,
            apps: &self.apps,
            linker: self.linker,
        }
        .run(new_base)
    }

    /// Where the app stored as `app_path` lives right now.
    pub fn app_path(&self, app_path: &str) -> PathBuf {
        resolve_app_path(&self.base_directory(), app_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::MemoryAppStore;
    use crate::base_dir::picker::FixedPicker;
    use crate::settings::MemorySettingsStore;
    use std::fs;
    use tempfile::tempdir;

    fn service(default_path: &Path) -> BaseDirService<MemorySettingsStore, MemoryAppStore> {
        BaseDirService::new(
            default_path,
            MemorySettingsStore::default(),
            MemoryAppStore::default(),
        )
    }

    #[test]
    fn info_reports_default_as_not_custom() {
        let tmp = tempdir().unwrap();
        let svc = service(&tmp.path().join("dyad-apps"));
        let info = svc.get_base_directory_info();
        assert_eq!(info.path, tmp.path().join("dyad-apps"));
        assert!(!info.is_custom);
    }

    #[test]
    fn info_reports_override_as_custom() {
        let tmp = tempdir().unwrap();
        let svc = service(&tmp.path().join("dyad-apps"));
        svc.settings().write_override(Some(tmp.path())).unwrap();
        let info = svc.get_base_directory_info();
        assert_eq!(info.path, tmp.path());
        assert!(info.is_custom);
    }

    #[test]
    fn selection_canceled() {
        let tmp = tempdir().unwrap();
        let svc = service(tmp.path());
        let sel = svc.select_and_validate_directory(&FixedPicker(None)).unwrap();
        assert_eq!(
            sel,
            DirectorySelection {
                path: None,
                canceled: true
            }
        );
    }

    #[test]
    fn selection_of_directory_and_file() {
        let tmp = tempdir().unwrap();
        let svc = service(tmp.path());
        let dir = tmp.path().join("chosen");
        fs::create_dir(&dir).unwrap();
        let file = tmp.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        let sel = svc
            .select_and_validate_directory(&FixedPicker(Some(dir.clone())))
            .unwrap();
        assert_eq!(sel.path, Some(dir));
        assert!(!sel.canceled);

        let sel = svc
            .select_and_validate_directory(&FixedPicker(Some(file)))
            .unwrap();
        assert_eq!(sel.path, None);
        assert!(!sel.canceled);

        let sel = svc
            .select_and_validate_directory(&FixedPicker(Some(tmp.path().join("missing"))))
            .unwrap();
        assert_eq!(sel.path, None);
        assert!(!sel.canceled);
    }

    #[test]
    fn app_path_follows_base() {
        let tmp = tempdir().unwrap();
        let svc = service(&tmp.path().join("dyad-apps"));
        assert_eq!(svc.app_path("foo"), tmp.path().join("dyad-apps").join("foo"));
    }
}
