use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the base-directory resolver and migration engine.
#[derive(Error, Debug)]
pub enum BaseDirError {
    /// The requested base directory exists but is not a directory, or
    /// could not be stat'ed at all.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Base directories are stored and compared as absolute paths.
    #[error("base directory must be an absolute path: {}", .0.display())]
    RelativePath(PathBuf),

    /// A link needed to keep an app reachable could not be created. The
    /// migration was aborted and the override left untouched.
    #[error("failed to create link `{}` -> `{}`: {source}", .link.display(), .target.display())]
    LinkCreationFailed {
        link: PathBuf,
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The new base directory could not be created.
    #[error("failed to create directory `{}`: {source}", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    AppStore(#[from] StoreError),
}

/// Errors produced while reading or writing the settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("settings I/O error on `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file `{}`: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Errors produced by the app-record store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("app store I/O error on `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid app store `{}`: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("an app with path `{0}` is already registered")]
    Duplicate(String),
}
