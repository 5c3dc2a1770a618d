use std::path::{Path, PathBuf};

use crate::fs_op::stat::is_dir;
use crate::settings::SettingsStore;

/// Compute the effective base directory.
///
/// Returns the persisted override when it names an existing directory,
/// otherwise `default_path`. An override that no longer stats as a
/// directory is cleared from `settings` so later calls skip it.
///
/// The override is expected to be absolute; [`Migration::run`] only ever
/// persists absolute paths. A relative value found in a hand-edited settings
/// file is checked against the process working directory.
///
/// [`Migration::run`]: crate::base_dir::migrate::Migration::run
///
/// Never fails: settings errors are logged and treated as "no override".
pub fn resolve_base_directory(default_path: &Path, settings: &dyn SettingsStore) -> PathBuf {
    let custom = match settings.read_override() {
        Ok(Some(p)) if !p.as_os_str().is_empty() => p,
        Ok(_) => return default_path.to_path_buf(),
        Err(e) => {
            tracing::warn!("could not read base directory override: {}", e);
            return default_path.to_path_buf();
        }
    };

    if is_dir(&custom) {
        return custom;
    }

    tracing::warn!(
        "base directory override {} is missing or not a directory, resetting to {}",
        custom.display(),
        default_path.display()
    );
    if let Err(e) = settings.write_override(None) {
        tracing::warn!("could not clear base directory override: {}", e);
    }
    default_path.to_path_buf()
}
