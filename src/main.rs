use anyhow::{anyhow, Context};
use chrono::Utc;
use clap::Parser;

use appbase::apps::{AppRecord, AppStore, JsonAppStore};
use appbase::base_dir::{BaseDirService, MigrationReport, PromptPicker};
use appbase::cli::{AppsCommand, Cli, Command};
use appbase::fs_op::path::resolve_directory;
use appbase::settings::config_dirs::{APPS_FILE, SETTINGS_FILE};
use appbase::settings::{
    default_base_directory, embedded_base_directory, project_config_dir, user_data_dir,
    FileSettingsStore,
};

type Service = BaseDirService<FileSettingsStore, JsonAppStore>;

fn build_service(cli: &Cli) -> anyhow::Result<Service> {
    let config_dir = match &cli.config_dir {
        Some(d) => d.clone(),
        None => project_config_dir(&cli.app_name)
            .ok_or_else(|| anyhow!("could not determine the config directory; pass --config-dir"))?,
    };
    let default_dir = match &cli.default_dir {
        Some(d) => d.clone(),
        None if cli.embedded => user_data_dir(&cli.app_name)
            .map(|data| embedded_base_directory(&data, &cli.app_name))
            .ok_or_else(|| anyhow!("could not determine the data directory; pass --default-dir"))?,
        None => default_base_directory(&cli.app_name)
            .ok_or_else(|| anyhow!("could not determine the home directory; pass --default-dir"))?,
    };
    tracing::debug!(
        "config dir {}, default base {}",
        config_dir.display(),
        default_dir.display()
    );

    Ok(BaseDirService::new(
        default_dir,
        FileSettingsStore::new(config_dir.join(SETTINGS_FILE)),
        JsonAppStore::new(config_dir.join(APPS_FILE)),
    ))
}

fn print_report(report: &MigrationReport) {
    println!("Base directory: {}", report.base_directory.display());
    println!(
        "Linked {} app(s), {} already present, {} missing, {} absolute",
        report.created, report.already_present, report.source_gone, report.absolute_skipped
    );
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let svc = build_service(&cli)?;

    match cli.command {
        Command::Info { json } => {
            let info = svc.get_base_directory_info();
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{}", info.path.display());
                if info.is_custom {
                    println!("(custom; default is {})", svc.default_path().display());
                }
                println!("settings: {}", svc.settings().path().display());
                println!("apps: {}", svc.apps().path().display());
            }
        }
        Command::Select { apply } => {
            let selection = svc
                .select_and_validate_directory(&PromptPicker::default())
                .context("directory selection failed")?;
            match (&selection.path, selection.canceled) {
                (_, true) => println!("Canceled"),
                (None, false) => return Err(anyhow!("the selected path is not a directory")),
                (Some(path), false) => {
                    println!("{}", path.display());
                    if apply {
                        let report = svc
                            .set_base_directory(Some(path.as_path()))
                            .context("could not change the base directory")?;
                        print_report(&report);
                    }
                }
            }
        }
        Command::Set { path } => {
            let cwd = std::env::current_dir()?;
            let path = resolve_directory(&path, &cwd)?;
            let report = svc
                .set_base_directory(Some(path.as_path()))
                .context("could not change the base directory")?;
            print_report(&report);
        }
        Command::Reset => {
            let report = svc
                .set_base_directory(None)
                .context("could not reset the base directory")?;
            print_report(&report);
        }
        Command::Apps { command } => match command {
            AppsCommand::List => {
                for app in svc.apps().list_apps()? {
                    println!("{}\t{}", app.created_at.to_rfc3339(), app.path);
                }
            }
            AppsCommand::Add { path } => {
                svc.apps().add_app(AppRecord::new(path.as_str(), Utc::now()))?;
                println!("{}", svc.app_path(&path).display());
            }
            AppsCommand::Path { path } => {
                println!("{}", svc.app_path(&path).display());
            }
        },
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let _guard = match appbase::logging::init(cli.verbose, cli.log_file.as_deref()) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("failed to initialise logging: {:#}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = run(cli) {
        tracing::debug!("command failed: {:?}", e);
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
