//! Process execution port trait.

use std::fmt;
use std::path::{Path, PathBuf};

/// A fully resolved child process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Working directory for the child.
    pub cwd: PathBuf,
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Result of a child run whose output was captured instead of shown.
#[derive(Debug, Clone, Default)]
pub struct CapturedRun {
    pub success: bool,
    /// `None` when the child was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

pub trait ProcessPort {
    /// Locate an executable by name on the search path, or check it directly
    /// when `program` already contains a path separator.
    fn resolve(&self, program: &Path) -> Option<PathBuf>;

    /// Run to completion with stdout and stderr captured.
    fn run_captured(&self, command: &CommandSpec) -> std::io::Result<CapturedRun>;

    /// Transfer control to `command` with inherited standard streams.
    ///
    /// Where the process image is replaced this only returns on failure.
    /// Otherwise it waits and returns the child's exit code.
    fn hand_off(&self, command: &CommandSpec) -> std::io::Result<i32>;
}
