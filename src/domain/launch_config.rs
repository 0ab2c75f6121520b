//! Launch plan: which interpreter, which manifest, which secrets file, which
//! program.
//!
//! Values come from an optional INI file; anything not set there falls back
//! to the defaults below. Relative file paths are resolved against the
//! project directory.

use crate::domain::error::LauncherError;
use crate::ports::config_port::ConfigPort;
use crate::ports::process_port::CommandSpec;
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_INTERPRETER: &str = "python3";
pub const DEFAULT_MANIFEST: &str = "requirements.txt";
pub const DEFAULT_INSTALLER_ARGS: &str = "-m pip install -q -r";
pub const DEFAULT_SECRETS_FILE: &str = ".env";
pub const DEFAULT_SECRETS_TEMPLATE: &str = ".env.example";
pub const DEFAULT_PROGRAM: &str = "main.py";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    pub project_dir: PathBuf,
    pub interpreter: String,
    pub manifest: PathBuf,
    /// Package manager to run; `None` runs the interpreter itself.
    pub installer: Option<String>,
    pub installer_args: Vec<String>,
    pub skip_install: bool,
    pub secrets_file: PathBuf,
    pub secrets_template: PathBuf,
    pub program: String,
    pub program_args: Vec<String>,
}

impl LaunchConfig {
    /// Built-in defaults rooted at `project_dir`, made absolute so paths
    /// handed to child processes survive their change of directory.
    pub fn with_project_dir(project_dir: &Path) -> Self {
        let project_dir = absolute_dir(project_dir);
        Self {
            project_dir: project_dir.clone(),
            interpreter: DEFAULT_INTERPRETER.to_string(),
            manifest: project_dir.join(DEFAULT_MANIFEST),
            installer: None,
            installer_args: split_args(DEFAULT_INSTALLER_ARGS),
            skip_install: false,
            secrets_file: project_dir.join(DEFAULT_SECRETS_FILE),
            secrets_template: project_dir.join(DEFAULT_SECRETS_TEMPLATE),
            program: DEFAULT_PROGRAM.to_string(),
            program_args: Vec::new(),
        }
    }

    pub fn from_config(config: &dyn ConfigPort, project_dir: &Path) -> Result<Self, LauncherError> {
        let mut launch = Self::with_project_dir(project_dir);

        if let Some(interpreter) = non_empty(config, "runtime", "interpreter")? {
            launch.interpreter = interpreter;
        }
        if let Some(manifest) = non_empty(config, "dependencies", "manifest")? {
            launch.manifest = launch.project_dir.join(manifest);
        }
        launch.installer = non_empty(config, "dependencies", "installer")?;
        if let Some(args) = config.get_string("dependencies", "installer_args") {
            launch.installer_args = split_args(&args);
        }
        launch.skip_install = config.get_bool("dependencies", "skip", false);
        if let Some(file) = non_empty(config, "secrets", "file")? {
            launch.secrets_file = launch.project_dir.join(file);
        }
        if let Some(template) = non_empty(config, "secrets", "template")? {
            launch.secrets_template = launch.project_dir.join(template);
        }
        if let Some(program) = non_empty(config, "launch", "program")? {
            launch.program = program;
        }
        if let Some(args) = config.get_string("launch", "args") {
            launch.program_args = split_args(&args);
        }

        Ok(launch)
    }

    /// Where to look for an executable named in the config. Bare names go
    /// through the search path; anything with a separator is taken relative
    /// to the project directory.
    pub fn locate(&self, program: &str) -> PathBuf {
        let path = Path::new(program);
        if path.components().count() > 1 {
            self.project_dir.join(path)
        } else {
            path.to_path_buf()
        }
    }

    /// The package-manager invocation: `installer args... <manifest>`.
    pub fn install_command(&self, installer: PathBuf) -> CommandSpec {
        let mut args = self.installer_args.clone();
        args.push(self.manifest.display().to_string());
        CommandSpec {
            program: installer,
            args,
            cwd: self.project_dir.clone(),
        }
    }

    /// The main-program invocation: `interpreter program args...`.
    pub fn launch_command(&self, interpreter: PathBuf) -> CommandSpec {
        let mut args = Vec::with_capacity(self.program_args.len() + 1);
        args.push(self.program.clone());
        args.extend(self.program_args.iter().cloned());
        CommandSpec {
            program: interpreter,
            args,
            cwd: self.project_dir.clone(),
        }
    }
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self::with_project_dir(Path::new("."))
    }
}

/// `dir` as an absolute path. Falls back to `dir` unchanged when the
/// working directory cannot be read.
pub fn absolute_dir(dir: &Path) -> PathBuf {
    std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf())
}

/// Lexically drop `.` and fold `..` without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

pub fn split_args(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_string).collect()
}

fn non_empty(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<String>, LauncherError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Err(LauncherError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("{key} must not be empty"),
        }),
        Some(value) => Ok(Some(value.trim().to_string())),
    }
}
