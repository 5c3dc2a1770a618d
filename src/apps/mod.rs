//! App records: the user-created projects whose directories live under the
//! base directory.

pub mod record;
pub mod store;

pub use record::{resolve_app_path, AppRecord};
pub use store::{AppStore, JsonAppStore, MemoryAppStore};
