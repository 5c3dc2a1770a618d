//! Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "appbase", version, about = "Manage where apps are stored")]
pub struct Cli {
    /// Directory holding settings.toml and apps.json
    #[arg(long, global = true, env = "APPBASE_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Replace the default base directory (<home>/<app-name>-apps)
    #[arg(long, global = true, env = "APPBASE_DEFAULT_DIR")]
    pub default_dir: Option<PathBuf>,

    /// Keep the default base directory under the per-user data folder
    /// instead of the home directory
    #[arg(long, global = true, env = "APPBASE_EMBEDDED")]
    pub embedded: bool,

    /// Application name used for the default directories
    #[arg(long, global = true, default_value = crate::settings::config_dirs::DEFAULT_APP_NAME)]
    pub app_name: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current base directory
    Info {
        #[arg(long)]
        json: bool,
    },
    /// Pick a folder interactively and validate it
    Select {
        /// Make the picked folder the base directory
        #[arg(long)]
        apply: bool,
    },
    /// Move the base directory, linking existing apps into it
    Set { path: String },
    /// Go back to the default base directory
    Reset,
    /// Manage app records
    Apps {
        #[command(subcommand)]
        command: AppsCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum AppsCommand {
    /// List apps, newest first
    List,
    /// Register an app (relative to the base directory, or absolute)
    Add { path: String },
    /// Print where an app lives on disk
    Path { path: String },
}
