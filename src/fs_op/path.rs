use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::fs_op::stat::PathType;

/// Errors that can occur when resolving a user-supplied path.
#[derive(Debug, PartialEq, Eq)]
pub enum PathError {
    Empty,
    HomeNotFound,
    NotFound(PathBuf),
    NotDirectory(PathBuf),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::Empty => write!(f, "empty path"),
            PathError::HomeNotFound => write!(f, "could not determine home directory"),
            PathError::NotFound(p) => write!(f, "path does not exist: {}", p.display()),
            PathError::NotDirectory(p) => write!(f, "not a directory: {}", p.display()),
        }
    }
}

impl std::error::Error for PathError {}

/// Turn user input into a path without checking that it exists.
///
/// - Empty `input` is an error.
/// - A leading `~` is expanded to the user's home directory.
/// - Absolute paths are returned as-is.
/// - Relative paths are resolved relative to `base`.
pub fn expand_user_path(input: &str, base: &Path) -> Result<PathBuf, PathError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(PathError::Empty);
    }

    if input.starts_with('~') {
        return expand_tilde(input).ok_or(PathError::HomeNotFound);
    }

    let p = PathBuf::from(input);
    if p.is_absolute() {
        Ok(p)
    } else {
        Ok(base.join(p))
    }
}

/// Resolve and validate a user-supplied directory path.
///
/// Same expansion rules as [`expand_user_path`]; the returned path must
/// exist and be a directory, otherwise a `PathError` describing the problem
/// is returned.
pub fn resolve_directory(input: &str, base: &Path) -> Result<PathBuf, PathError> {
    let candidate = expand_user_path(input, base)?;
    match PathType::of(&candidate) {
        PathType::Directory => Ok(candidate),
        PathType::NotFound => Err(PathError::NotFound(candidate)),
        PathType::File | PathType::Other => Err(PathError::NotDirectory(candidate)),
    }
}

/// Collapse `.` and `..` components without touching the filesystem.
///
/// `..` at the root stays at the root. A leading `..` in a relative path is
/// kept since there is nothing to pop.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

// Expand a path beginning with `~` into a `PathBuf` pointing at the user's
// home directory. Returns `None` when the home directory cannot be determined.
fn expand_tilde(input: &str) -> Option<PathBuf> {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .or_else(|| directories_next::BaseDirs::new().map(|b| b.home_dir().to_path_buf()))?;
    let rest = input.trim_start_matches('~');
    let mut p = home;
    if !rest.is_empty() {
        // Trim leading separators so `~/foo` and `~foo` behave sensibly.
        let trimmed = rest.trim_start_matches(['/', '\\']);
        p.push(trimmed);
    }
    Some(p)
}
