pub mod config_dirs;
pub mod read_settings;
pub mod store;
pub mod write_settings;

// Re-export commonly used types/functions for convenience
pub use config_dirs::{
    default_base_directory, embedded_base_directory, project_config_dir, user_data_dir,
};
pub use read_settings::load_settings;
pub use store::{FileSettingsStore, MemorySettingsStore, SettingsStore};
pub use write_settings::{save_settings, Settings};
