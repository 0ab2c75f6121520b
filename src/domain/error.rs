//! Launcher error types.

use std::path::PathBuf;

/// Top-level error type for the launcher.
///
/// Every variant is terminal: the launcher prints it and exits.
#[derive(Debug, thiserror::Error)]
pub enum LauncherError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("{interpreter} is not installed or not on PATH")]
    InterpreterMissing { interpreter: String },

    #[error("{installer} is not installed or not on PATH")]
    InstallerMissing { installer: String },

    #[error("dependency manifest {} not found", path.display())]
    ManifestMissing { path: PathBuf },

    #[error("dependency installation failed ({reason}); check your network connection")]
    InstallFailed {
        reason: String,
        /// Tail of the installer's captured output, shown as a hint.
        output: Vec<String>,
    },

    #[error("secrets template {} not found", path.display())]
    TemplateMissing { path: PathBuf },

    #[error("failed to launch {program}: {reason}")]
    LaunchFailed { program: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LauncherError {
    pub fn exit_status(&self) -> u8 {
        match self {
            LauncherError::ConfigParse { .. } | LauncherError::ConfigInvalid { .. } => 2,
            LauncherError::InterpreterMissing { .. }
            | LauncherError::InstallerMissing { .. }
            | LauncherError::ManifestMissing { .. }
            | LauncherError::InstallFailed { .. }
            | LauncherError::TemplateMissing { .. }
            | LauncherError::LaunchFailed { .. }
            | LauncherError::Io(_) => 1,
        }
    }
}
