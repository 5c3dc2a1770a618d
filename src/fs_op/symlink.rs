//! Small utilities for working with symbolic links and directory junctions.
//!
//! These helpers centralize link-specific behavior so callers don't need to
//! duplicate platform distinctions. They return `io::Result` and propagate
//! the underlying OS errors unchanged so the migration engine can tell a
//! benign failure (`AlreadyExists`, `NotFound`) from a fatal one.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use crate::fs_op::path::normalize_lexically;

/// The kind of link used to make an app reachable from a new base directory.
///
/// Selected once at startup with [`LinkCreator::for_platform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkCreator {
    /// A plain symbolic link.
    Symlink,
    /// A directory junction (Windows). On other platforms this is a
    /// symbolic link, which is the closest equivalent.
    Junction,
    /// Try a symbolic link first and fall back to a junction when the OS
    /// refuses (for example when symlinks require elevated privileges).
    SymlinkWithJunctionFallback,
}

impl LinkCreator {
    /// Pick the strategy for the platform we were compiled for.
    pub fn for_platform() -> Self {
        if cfg!(windows) {
            LinkCreator::SymlinkWithJunctionFallback
        } else {
            LinkCreator::Symlink
        }
    }

    /// Create a link at `link` that points to `target`.
    ///
    /// An existing entry at `link` is never replaced; the OS error
    /// (`AlreadyExists`) is returned instead.
    pub fn create(self, target: &Path, link: &Path) -> io::Result<()> {
        match self {
            LinkCreator::Symlink => create_symlink(target, link),
            LinkCreator::Junction => create_junction(target, link),
            LinkCreator::SymlinkWithJunctionFallback => match create_symlink(target, link) {
                Ok(()) => Ok(()),
                Err(e) if is_benign_kind(e.kind()) => Err(e),
                Err(e) => {
                    tracing::debug!(
                        "symlink {} -> {} failed ({}), trying junction",
                        link.display(),
                        target.display(),
                        e
                    );
                    create_junction(target, link)
                }
            },
        }
    }
}

fn is_benign_kind(kind: io::ErrorKind) -> bool {
    matches!(kind, io::ErrorKind::AlreadyExists | io::ErrorKind::NotFound)
}

/// Create a directory symbolic link at `link` that points to `target`.
pub(crate) fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link)
    }

    #[cfg(windows)]
    {
        std::os::windows::fs::symlink_dir(target, link)
    }
}

/// Create a directory junction at `link` that points to `target`.
///
/// Junctions do not need the symlink privilege on Windows. They are made
/// through `mklink /J` because the standard library has no junction API.
pub(crate) fn create_junction(target: &Path, link: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        if link.symlink_metadata().is_ok() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", link.display()),
            ));
        }
        let status = std::process::Command::new("cmd")
            .arg("/C")
            .arg("mklink")
            .arg("/J")
            .arg(link)
            .arg(target)
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!(
                "mklink /J {} {} exited with {}",
                link.display(),
                target.display(),
                status
            )))
        }
    }

    #[cfg(not(windows))]
    {
        create_symlink(target, link)
    }
}

/// Returns `true` when `path` itself is a symbolic link.
///
/// This checks the *link* metadata (does not follow the link).
pub fn is_symlink(path: &Path) -> io::Result<bool> {
    Ok(path.symlink_metadata()?.file_type().is_symlink())
}

/// Follow symbolic links starting at `start` until reaching a path that is
/// not a link, a path that does not exist, or a path already visited in this
/// chain. The last path reached is returned.
///
/// Relative link contents are resolved against the directory holding the
/// link and normalized lexically, so `a -> ../dir/b` and `b -> ../dir/a`
/// revisit the same two paths. Only one level is read per step so every intermediate hop is
/// checked against the visited set.
pub fn resolve_link_chain(start: &Path) -> PathBuf {
    let mut seen = HashSet::new();
    let mut current = start.to_path_buf();

    while !seen.contains(&current) {
        let meta = match current.symlink_metadata() {
            Ok(m) => m,
            Err(_) => break,
        };
        if !meta.file_type().is_symlink() {
            break;
        }

        let next = match current.read_link() {
            Ok(n) => n,
            Err(e) => {
                tracing::debug!("could not read link {}: {}", current.display(), e);
                break;
            }
        };
        let next = if next.is_absolute() {
            next
        } else {
            match current.parent() {
                Some(dir) => normalize_lexically(&dir.join(next)),
                None => next,
            }
        };
        seen.insert(current);
        current = next;
    }

    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn platform_strategy_matches_target() {
        let creator = LinkCreator::for_platform();
        if cfg!(windows) {
            assert_eq!(creator, LinkCreator::SymlinkWithJunctionFallback);
        } else {
            assert_eq!(creator, LinkCreator::Symlink);
        }
    }

    // These tests run on Unix CI; Windows symlink creation often requires
    // developer privileges and should be tested separately on Windows hosts.
    #[cfg(unix)]
    #[test]
    fn create_dir_link_with_every_strategy() -> io::Result<()> {
        let tmp = tempdir()?;
        let dir = tmp.path().join("somedir");
        fs::create_dir(&dir)?;

        for (i, creator) in [
            LinkCreator::Symlink,
            LinkCreator::Junction,
            LinkCreator::SymlinkWithJunctionFallback,
        ]
        .into_iter()
        .enumerate()
        {
            let link = tmp.path().join(format!("dir.link{}", i));
            creator.create(&dir, &link)?;
            assert!(is_symlink(&link)?);
            assert_eq!(fs::canonicalize(&link)?, fs::canonicalize(&dir)?);
        }
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn existing_entry_is_not_replaced() -> io::Result<()> {
        let tmp = tempdir()?;
        let dir = tmp.path().join("somedir");
        let link = tmp.path().join("taken");
        fs::create_dir(&dir)?;
        fs::create_dir(&link)?;

        let err = LinkCreator::SymlinkWithJunctionFallback
            .create(&dir, &link)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert!(!is_symlink(&link)?);
        Ok(())
    }

    #[test]
    fn chain_stops_at_real_directory() -> io::Result<()> {
        let tmp = tempdir()?;
        let dir = tmp.path().join("real");
        fs::create_dir(&dir)?;
        assert_eq!(resolve_link_chain(&dir), dir);
        Ok(())
    }

    #[test]
    fn chain_stops_at_missing_path() {
        let tmp = tempdir().unwrap();
        let missing = tmp.path().join("nope");
        assert_eq!(resolve_link_chain(&missing), missing);
    }

    #[cfg(unix)]
    #[test]
    fn chain_follows_relative_and_absolute_hops() -> io::Result<()> {
        use std::os::unix::fs::symlink;

        let tmp = tempdir()?;
        let real = tmp.path().join("real");
        fs::create_dir(&real)?;
        let sub = tmp.path().join("sub");
        fs::create_dir(&sub)?;

        // sub/hop1 -> ../real (relative), top -> sub/hop1 (absolute)
        symlink("../real", sub.join("hop1"))?;
        symlink(sub.join("hop1"), tmp.path().join("top"))?;

        let end = resolve_link_chain(&tmp.path().join("top"));
        assert!(!is_symlink(&end)?);
        assert_eq!(fs::canonicalize(&end)?, fs::canonicalize(&real)?);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn chain_terminates_on_cycle() -> io::Result<()> {
        use std::os::unix::fs::symlink;

        let tmp = tempdir()?;
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        symlink(&b, &a)?;
        symlink(&a, &b)?;

        let end = resolve_link_chain(&a);
        assert!(end == a || end == b, "unexpected end of chain: {:?}", end);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn chain_terminates_on_relative_cycle() -> io::Result<()> {
        use std::os::unix::fs::symlink;

        let tmp = tempdir()?;
        let dir = tmp.path().join("apps");
        fs::create_dir(&dir)?;
        let a = dir.join("a");
        let b = dir.join("b");
        symlink("../apps/b", &a)?;
        symlink("../apps/a", &b)?;

        let end = resolve_link_chain(&a);
        assert!(end == a || end == b, "unexpected end of chain: {:?}", end);
        Ok(())
    }
}
