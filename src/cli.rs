//! CLI definition and dispatch.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::ansi_console::AnsiConsole;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::system_process::SystemProcess;
use crate::domain::bootstrap::{self, Outcome};
use crate::domain::config_validation::validate_launch_config;
use crate::domain::error::LauncherError;
use crate::domain::launch_config::LaunchConfig;
use crate::ports::console_port::ConsolePort;
use crate::ports::process_port::ProcessPort;

/// Looked up in the project directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "launcher.ini";

#[derive(Parser, Debug)]
#[command(
    name = "perris-launcher",
    about = "Check the environment, install dependencies and start the trading bot"
)]
pub struct Cli {
    /// Bot checkout to bootstrap
    #[arg(short = 'C', long, default_value = ".")]
    pub project_dir: PathBuf,
    /// Launcher INI file (default: <project-dir>/launcher.ini if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Report what would happen without installing, writing or launching
    #[arg(long)]
    pub dry_run: bool,
    /// Do not run the package manager
    #[arg(long)]
    pub skip_install: bool,
}

pub fn run(cli: Cli) -> ExitCode {
    let process = SystemProcess::new();
    let console = AnsiConsole::detect();
    ExitCode::from(run_with(&cli, &process, &console))
}

/// Full launcher run against the given ports. Returns the exit status.
pub fn run_with(cli: &Cli, process: &dyn ProcessPort, console: &dyn ConsolePort) -> u8 {
    let mut config = match resolve_launch_config(cli) {
        Ok(c) => c,
        Err(e) => return report(console, &e),
    };
    if cli.skip_install {
        config.skip_install = true;
    }

    if cli.dry_run {
        return match bootstrap::dry_run(&config, process, console) {
            Ok(()) => 0,
            Err(e) => report(console, &e),
        };
    }

    match bootstrap::bootstrap(&config, process, console) {
        Ok(Outcome::Launched { status }) => u8::try_from(status).unwrap_or(1),
        Ok(Outcome::AwaitingOperator { .. }) => 1,
        Err(e) => report(console, &e),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, LauncherError> {
    FileConfigAdapter::from_file(path).map_err(|e| LauncherError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Explicit `--config`, else `launcher.ini` in the project directory, else
/// built-in defaults.
pub fn resolve_launch_config(cli: &Cli) -> Result<LaunchConfig, LauncherError> {
    let path = match &cli.config {
        Some(p) => Some(p.clone()),
        None => {
            let candidate = cli.project_dir.join(DEFAULT_CONFIG_FILE);
            candidate.is_file().then_some(candidate)
        }
    };

    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading launcher config");
            let adapter = load_config(&path)?;
            validate_launch_config(&adapter, &cli.project_dir)?;
            LaunchConfig::from_config(&adapter, &cli.project_dir)
        }
        None => Ok(LaunchConfig::with_project_dir(&cli.project_dir)),
    }
}

fn report(console: &dyn ConsolePort, err: &LauncherError) -> u8 {
    console.error(&err.to_string());
    if let LauncherError::InstallFailed { output, .. } = err {
        if !output.is_empty() {
            console.warn("Installer output (last lines):");
            for line in output {
                console.warn(&format!("  {line}"));
            }
        }
    }
    err.exit_status()
}
