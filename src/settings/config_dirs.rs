//! Platform directories used by the crate.
//!
//! Everything is derived from `directories-next` so the same binary puts its
//! files in the conventional place on Linux, macOS and Windows.

use std::path::{Path, PathBuf};

use directories_next::{BaseDirs, ProjectDirs};

/// Application name used for project directories and the default base
/// directory (`<home>/<app-name>-apps`).
pub const DEFAULT_APP_NAME: &str = "dyad";

/// File name of the persisted settings inside the config directory.
pub const SETTINGS_FILE: &str = "settings.toml";

/// File name of the app-record store inside the config directory.
pub const APPS_FILE: &str = "apps.json";

fn project_dirs(app_name: &str) -> Option<ProjectDirs> {
    ProjectDirs::from("", "", app_name)
}

/// Per-user configuration directory for `app_name`.
pub fn project_config_dir(app_name: &str) -> Option<PathBuf> {
    project_dirs(app_name).map(|d| d.config_dir().to_path_buf())
}

/// Per-user data directory for `app_name` (the "userData" folder of a
/// desktop shell).
pub fn user_data_dir(app_name: &str) -> Option<PathBuf> {
    project_dirs(app_name).map(|d| d.data_dir().to_path_buf())
}

/// The fixed default base directory: `<home>/<app-name>-apps`.
pub fn default_base_directory(app_name: &str) -> Option<PathBuf> {
    BaseDirs::new().map(|b| b.home_dir().join(apps_dir_name(app_name)))
}

/// The default base directory used in embedded and test builds, kept under
/// the user-data folder instead of the home directory.
pub fn embedded_base_directory(user_data: &Path, app_name: &str) -> PathBuf {
    user_data.join(apps_dir_name(app_name))
}

fn apps_dir_name(app_name: &str) -> String {
    format!("{}-apps", app_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_default_lives_under_user_data() {
        let got = embedded_base_directory(Path::new("/data/app"), "dyad");
        assert_eq!(got, Path::new("/data/app/dyad-apps"));
    }

    #[test]
    fn home_default_uses_app_name_suffix() {
        if let Some(p) = default_base_directory("demo") {
            assert_eq!(p.file_name().unwrap(), "demo-apps");
        }
    }
}
