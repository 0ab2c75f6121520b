//! Process adapter backed by `std::process`.
//!
//! On Unix the handoff replaces the launcher's process image with `exec`, so
//! the main program owns the terminal and receives interrupts directly.
//! Elsewhere it spawns with inherited streams and waits.

use crate::ports::process_port::{CapturedRun, CommandSpec, ProcessPort};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub struct SystemProcess {
    search_path: Option<OsString>,
}

impl SystemProcess {
    /// Uses the launcher's own `PATH`.
    pub fn new() -> Self {
        Self {
            search_path: std::env::var_os("PATH"),
        }
    }

    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }

    fn command(spec: &CommandSpec) -> Command {
        let mut command = Command::new(&spec.program);
        command.args(&spec.args).current_dir(&spec.cwd);
        command
    }
}

impl Default for SystemProcess {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessPort for SystemProcess {
    fn resolve(&self, program: &Path) -> Option<PathBuf> {
        find_executable(program, self.search_path.as_deref())
    }

    fn run_captured(&self, spec: &CommandSpec) -> std::io::Result<CapturedRun> {
        let output = Self::command(spec).stdin(Stdio::null()).output()?;
        Ok(CapturedRun {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    #[cfg(unix)]
    fn hand_off(&self, spec: &CommandSpec) -> std::io::Result<i32> {
        use std::os::unix::process::CommandExt;
        Err(Self::command(spec).exec())
    }

    #[cfg(not(unix))]
    fn hand_off(&self, spec: &CommandSpec) -> std::io::Result<i32> {
        let status = Self::command(spec).status()?;
        Ok(status.code().unwrap_or(1))
    }
}

/// Look `program` up on `search_path`, the way a shell resolves a command.
///
/// A name with a path separator is checked as-is.
pub fn find_executable(program: impl AsRef<Path>, search_path: Option<&OsStr>) -> Option<PathBuf> {
    let candidate = program.as_ref();
    if candidate.as_os_str().is_empty() {
        return None;
    }
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }
    let search_path = search_path?;
    std::env::split_paths(search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| candidates(&dir, candidate))
        .find(|path| is_executable(path))
}

#[cfg(unix)]
fn candidates(dir: &Path, program: &Path) -> Vec<PathBuf> {
    vec![dir.join(program)]
}

#[cfg(not(unix))]
fn candidates(dir: &Path, program: &Path) -> Vec<PathBuf> {
    let mut exe = program.as_os_str().to_os_string();
    exe.push(".exe");
    vec![dir.join(program), dir.join(exe)]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
