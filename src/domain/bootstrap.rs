//! The bootstrap gate sequence.
//!
//! interpreter check -> dependency install -> secrets gate -> handoff.
//! Each gate either passes control to the next or ends the run.

use crate::domain::error::LauncherError;
use crate::domain::launch_config::LaunchConfig;
use crate::domain::secrets::{self, SecretsCheck, SecretsStatus};
use crate::ports::console_port::ConsolePort;
use crate::ports::process_port::{CapturedRun, ProcessPort};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Lines of installer output kept for the failure diagnostic.
pub const INSTALL_OUTPUT_TAIL: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The main program ran and exited with `status`. Only observed where
    /// the launcher cannot replace its own process image.
    Launched { status: i32 },
    /// A secrets file was created from the template; the operator must edit
    /// it before the next run.
    AwaitingOperator { secrets: PathBuf },
}

pub fn bootstrap(
    config: &LaunchConfig,
    process: &dyn ProcessPort,
    console: &dyn ConsolePort,
) -> Result<Outcome, LauncherError> {
    let interpreter = check_interpreter(config, process)?;
    console.info(&format!(
        "{} found at {}",
        config.interpreter,
        interpreter.display()
    ));

    if config.skip_install {
        console.info("Skipping dependency installation");
    } else {
        console.info("Installing dependencies...");
        install_dependencies(config, &interpreter, process)?;
        console.info("Dependencies installed");
    }

    match secrets::ensure_secrets_file(&config.secrets_file, &config.secrets_template)? {
        SecretsStatus::Present => {
            debug!(path = %config.secrets_file.display(), "secrets file present");
        }
        SecretsStatus::Created => {
            console.warn(&format!(
                "Created {} from {}",
                config.secrets_file.display(),
                config.secrets_template.display()
            ));
            console.warn(&format!(
                "Edit {} with your API credentials, then run the launcher again",
                config.secrets_file.display()
            ));
            return Ok(Outcome::AwaitingOperator {
                secrets: config.secrets_file.clone(),
            });
        }
    }

    console.info(&format!("Starting {}...", config.program));
    let status = launch(config, &interpreter, process)?;
    Ok(Outcome::Launched { status })
}

pub fn check_interpreter(
    config: &LaunchConfig,
    process: &dyn ProcessPort,
) -> Result<PathBuf, LauncherError> {
    match process.resolve(&config.locate(&config.interpreter)) {
        Some(path) => {
            debug!(interpreter = %config.interpreter, path = %path.display(), "interpreter resolved");
            Ok(path)
        }
        None => Err(LauncherError::InterpreterMissing {
            interpreter: config.interpreter.clone(),
        }),
    }
}

pub fn install_dependencies(
    config: &LaunchConfig,
    interpreter: &Path,
    process: &dyn ProcessPort,
) -> Result<(), LauncherError> {
    if !config.manifest.is_file() {
        return Err(LauncherError::ManifestMissing {
            path: config.manifest.clone(),
        });
    }

    let installer = resolve_installer(config, interpreter, process)?;
    let command = config.install_command(installer);
    info!(command = %command, "running installer");

    let run = process
        .run_captured(&command)
        .map_err(|e| LauncherError::InstallFailed {
            reason: e.to_string(),
            output: Vec::new(),
        })?;
    if run.success {
        return Ok(());
    }

    let reason = match run.code {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    };
    Err(LauncherError::InstallFailed {
        reason,
        output: output_tail(&run, INSTALL_OUTPUT_TAIL),
    })
}

pub fn launch(
    config: &LaunchConfig,
    interpreter: &Path,
    process: &dyn ProcessPort,
) -> Result<i32, LauncherError> {
    let command = config.launch_command(interpreter.to_path_buf());
    info!(command = %command, "handing off");
    process
        .hand_off(&command)
        .map_err(|e| LauncherError::LaunchFailed {
            program: config.program.clone(),
            reason: e.to_string(),
        })
}

/// Walk the gates without side effects and report what a real run would do.
pub fn dry_run(
    config: &LaunchConfig,
    process: &dyn ProcessPort,
    console: &dyn ConsolePort,
) -> Result<(), LauncherError> {
    console.info("Dry run: nothing will be installed, written or launched");

    let interpreter = check_interpreter(config, process)?;
    console.info(&format!(
        "{} found at {}",
        config.interpreter,
        interpreter.display()
    ));

    if config.skip_install {
        console.info("Would skip dependency installation");
    } else {
        if !config.manifest.is_file() {
            return Err(LauncherError::ManifestMissing {
                path: config.manifest.clone(),
            });
        }
        let installer = resolve_installer(config, &interpreter, process)?;
        console.info(&format!("Would run: {}", config.install_command(installer)));
    }

    match secrets::inspect_secrets(&config.secrets_file, &config.secrets_template) {
        SecretsCheck::Present => {
            console.info(&format!("{} present", config.secrets_file.display()));
        }
        SecretsCheck::WouldCreate => {
            console.warn(&format!(
                "{} missing; it would be created from {} and the launcher would stop",
                config.secrets_file.display(),
                config.secrets_template.display()
            ));
        }
        SecretsCheck::TemplateMissing => {
            return Err(LauncherError::TemplateMissing {
                path: config.secrets_template.clone(),
            });
        }
    }

    console.info(&format!(
        "Would launch: {}",
        config.launch_command(interpreter)
    ));
    Ok(())
}

fn resolve_installer(
    config: &LaunchConfig,
    interpreter: &Path,
    process: &dyn ProcessPort,
) -> Result<PathBuf, LauncherError> {
    match &config.installer {
        None => Ok(interpreter.to_path_buf()),
        Some(name) => process
            .resolve(&config.locate(name))
            .ok_or_else(|| LauncherError::InstallerMissing {
                installer: name.clone(),
            }),
    }
}

/// Last `max` non-blank lines of stderr, or of stdout when stderr is empty.
pub fn output_tail(run: &CapturedRun, max: usize) -> Vec<String> {
    let source = if run.stderr.trim().is_empty() {
        &run.stdout
    } else {
        &run.stderr
    };
    let lines: Vec<&str> = source.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(max);
    lines[start..].iter().map(|l| l.to_string()).collect()
}
