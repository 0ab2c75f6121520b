//! Launcher config validation.
//!
//! Catches values that would parse but make the launch plan meaningless,
//! before any step runs.

use crate::domain::error::LauncherError;
use crate::domain::launch_config::{
    absolute_dir, normalize, DEFAULT_SECRETS_FILE, DEFAULT_SECRETS_TEMPLATE,
};
use crate::ports::config_port::ConfigPort;
use std::path::Path;

pub fn validate_launch_config(
    config: &dyn ConfigPort,
    project_dir: &Path,
) -> Result<(), LauncherError> {
    validate_skip_flag(config)?;
    validate_secrets_paths(config, project_dir)?;
    Ok(())
}

fn validate_skip_flag(config: &dyn ConfigPort) -> Result<(), LauncherError> {
    let Some(value) = config.get_string("dependencies", "skip") else {
        return Ok(());
    };
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "false" | "no" | "0" => Ok(()),
        _ => Err(LauncherError::ConfigInvalid {
            section: "dependencies".to_string(),
            key: "skip".to_string(),
            reason: format!("expected a boolean, got {value:?}"),
        }),
    }
}

/// The template and the secrets file must be different files once both are
/// resolved against the project directory.
fn validate_secrets_paths(config: &dyn ConfigPort, project_dir: &Path) -> Result<(), LauncherError> {
    let file = config.get_string("secrets", "file");
    let template = config.get_string("secrets", "template");
    let file = file.as_deref().map(str::trim).unwrap_or(DEFAULT_SECRETS_FILE);
    let template = template.as_deref().map(str::trim).unwrap_or(DEFAULT_SECRETS_TEMPLATE);
    let root = absolute_dir(project_dir);
    if normalize(&root.join(file)) == normalize(&root.join(template)) {
        return Err(LauncherError::ConfigInvalid {
            section: "secrets".to_string(),
            key: "template".to_string(),
            reason: "template must differ from the secrets file".to_string(),
        });
    }
    Ok(())
}
