//! Moving the base directory without losing access to existing apps.
//!
//! Apps are never copied. For every app stored under a relative path, a
//! link is created in the new base pointing at the app's real directory
//! under the current base. The override is only persisted once every link
//! is in place, so a failed migration leaves the old base in effect.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::apps::AppStore;
use crate::base_dir::resolver::resolve_base_directory;
use crate::errors::BaseDirError;
use crate::fs_op::helpers::ensure_parent_exists;
use crate::fs_op::stat::PathType;
use crate::fs_op::symlink::{resolve_link_chain, LinkCreator};
use crate::settings::SettingsStore;

/// What happened when linking one app into the new base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    Created,
    /// Something already exists at the link path; the app (or one with the
    /// same name) is already reachable.
    AlreadyExists,
    /// The app's directory no longer exists.
    SourceGone,
}

/// Summary of a completed migration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    pub base_directory: PathBuf,
    pub created: usize,
    pub already_present: usize,
    pub source_gone: usize,
    pub absolute_skipped: usize,
}

/// The collaborators a migration needs.
pub struct Migration<'a> {
    pub default_path: &'a Path,
    pub settings: &'a dyn SettingsStore,
    pub apps: &'a dyn AppStore,
    pub linker: LinkCreator,
}

impl Migration<'_> {
    /// Make `new_base` (or the default when `None`/empty) the base directory.
    ///
    /// On error the persisted override is left as it was. Links created
    /// before the failing app are not removed; they are harmless and are
    /// skipped as already present on the next attempt.
    pub fn run(&self, new_base: Option<&Path>) -> Result<MigrationReport, BaseDirError> {
        let new_base = new_base.filter(|p| !p.as_os_str().is_empty());

        let target = match new_base {
            None => self.default_path.to_path_buf(),
            Some(p) if p.is_relative() => {
                return Err(BaseDirError::RelativePath(p.to_path_buf()))
            }
            Some(p) => match PathType::of(p) {
                PathType::Directory => p.to_path_buf(),
                _ => return Err(BaseDirError::NotADirectory(p.to_path_buf())),
            },
        };

        std::fs::create_dir_all(&target).map_err(|source| BaseDirError::CreateDirectory {
            path: target.clone(),
            source,
        })?;

        let apps = self.apps.list_apps()?;
        let current_base = resolve_base_directory(self.default_path, self.settings);
        tracing::debug!(
            "linking {} apps from {} into {}",
            apps.len(),
            current_base.display(),
            target.display()
        );

        let mut report = MigrationReport {
            base_directory: target.clone(),
            ..Default::default()
        };

        for app in &apps {
            if !app.is_relative() {
                report.absolute_skipped += 1;
                continue;
            }

            let link = target.join(&app.path);
            // Link straight to the real directory, never to another link.
            let real = resolve_link_chain(&current_base.join(&app.path));

            match link_app(self.linker, &real, &link) {
                Ok(LinkOutcome::Created) => report.created += 1,
                Ok(skip) => {
                    tracing::debug!(
                        "skipping link {} -> {}: {:?}",
                        link.display(),
                        real.display(),
                        skip
                    );
                    match skip {
                        LinkOutcome::AlreadyExists => report.already_present += 1,
                        _ => report.source_gone += 1,
                    }
                }
                Err(source) => {
                    tracing::error!(
                        "failed to create required link {} -> {}: {}",
                        link.display(),
                        real.display(),
                        source
                    );
                    return Err(BaseDirError::LinkCreationFailed {
                        link,
                        target: real,
                        source,
                    });
                }
            }
        }

        self.settings.write_override(new_base)?;
        tracing::info!(
            "base directory set to {} ({} linked, {} already present, {} gone)",
            target.display(),
            report.created,
            report.already_present,
            report.source_gone
        );
        Ok(report)
    }
}

/// Create the link for one app, classifying the benign failures.
///
/// `AlreadyExists` and `NotFound` from the OS are benign. A target that is
/// gone is detected before linking so no dangling link is ever created.
/// Anything else, including failure to create the link's parent, is
/// returned as an error.
pub fn link_app(linker: LinkCreator, target: &Path, link: &Path) -> io::Result<LinkOutcome> {
    match target.symlink_metadata() {
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LinkOutcome::SourceGone),
        _ => {}
    }

    if link.symlink_metadata().is_ok() {
        return Ok(LinkOutcome::AlreadyExists);
    }
    ensure_parent_exists(link)?;

    match linker.create(target, link) {
        Ok(()) => Ok(LinkOutcome::Created),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(LinkOutcome::AlreadyExists),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(LinkOutcome::SourceGone),
        Err(e) => Err(e),
    }
}
