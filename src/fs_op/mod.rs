//! Filesystem primitives: path classification and validation, link
//! creation and resolution, atomic writes.

pub mod helpers;
pub mod path;
pub mod stat;
pub mod symlink;
