//! Relocating the folder that holds user-created apps.
//!
//! [`base_dir::BaseDirService`] resolves the current base directory and
//! moves it: every app stored under a relative path is linked into the new
//! base before the new location is persisted, so no app becomes
//! unreachable.

pub mod apps;
pub mod base_dir;
pub mod cli;
pub mod errors;
pub mod fs_op;
pub mod logging;
pub mod settings;

pub use crate::base_dir::{BaseDirService, BaseDirectoryInfo, DirectorySelection, MigrationReport};
pub use crate::errors::BaseDirError;
