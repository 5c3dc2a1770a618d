//! Where apps are stored, and moving that place.

pub mod migrate;
pub mod picker;
pub mod resolver;
pub mod service;

pub use migrate::{link_app, LinkOutcome, Migration, MigrationReport};
pub use picker::{DirectoryPicker, FixedPicker, PromptPicker};
pub use resolver::resolve_base_directory;
pub use service::{BaseDirService, BaseDirectoryInfo, DirectorySelection};
