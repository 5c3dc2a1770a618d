use std::io;
use std::path::PathBuf;

use dialoguer::Input;

use crate::fs_op::path::{expand_user_path, PathError};

/// Asks the user for a folder. `Ok(None)` means the user canceled.
pub trait DirectoryPicker {
    fn pick_directory(&self) -> io::Result<Option<PathBuf>>;
}

/// A picker that always returns the same answer.
#[derive(Debug, Clone, Default)]
pub struct FixedPicker(pub Option<PathBuf>);

impl DirectoryPicker for FixedPicker {
    fn pick_directory(&self) -> io::Result<Option<PathBuf>> {
        Ok(self.0.clone())
    }
}

/// Terminal prompt. An empty answer cancels; `~` and relative paths are
/// expanded against the current directory.
#[derive(Debug, Clone)]
pub struct PromptPicker {
    prompt: String,
}

impl Default for PromptPicker {
    fn default() -> Self {
        Self {
            prompt: "Select the folder where apps should be stored (empty to cancel)".to_string(),
        }
    }
}

impl DirectoryPicker for PromptPicker {
    fn pick_directory(&self) -> io::Result<Option<PathBuf>> {
        let answer: String = Input::new()
            .with_prompt(self.prompt.as_str())
            .allow_empty(true)
            .interact_text()
            .map_err(io::Error::other)?;

        let cwd = std::env::current_dir()?;
        match expand_user_path(&answer, &cwd) {
            Ok(p) => Ok(Some(p)),
            Err(PathError::Empty) => Ok(None),
            Err(e) => Err(io::Error::new(io::ErrorKind::InvalidInput, e)),
        }
    }
}
