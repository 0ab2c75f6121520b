//! Terminal console with ANSI colour-coded severities.

use crate::ports::console_port::{ConsolePort, Severity};
use std::io::{self, IsTerminal, Write};

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Info and warnings go to stdout, errors to stderr.
pub struct AnsiConsole {
    color_stdout: bool,
    color_stderr: bool,
}

impl AnsiConsole {
    /// Colour only streams attached to a terminal, and never when `NO_COLOR`
    /// is set to a non-empty value.
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self {
            color_stdout: !no_color && io::stdout().is_terminal(),
            color_stderr: !no_color && io::stderr().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self {
            color_stdout: false,
            color_stderr: false,
        }
    }
}

pub fn format_message(severity: Severity, message: &str, color: bool) -> String {
    let (label, code) = match severity {
        Severity::Info => ("[INFO]", GREEN),
        Severity::Warning => ("[WARN]", YELLOW),
        Severity::Error => ("[ERROR]", RED),
    };
    if color {
        format!("{code}{label}{RESET} {message}")
    } else {
        format!("{label} {message}")
    }
}

impl ConsolePort for AnsiConsole {
    fn emit(&self, severity: Severity, message: &str) {
        // A closed pipe must not turn a diagnostic into a panic.
        match severity {
            Severity::Error => {
                let line = format_message(severity, message, self.color_stderr);
                let _ = writeln!(io::stderr().lock(), "{line}");
            }
            Severity::Info | Severity::Warning => {
                let line = format_message(severity, message, self.color_stdout);
                let mut out = io::stdout().lock();
                let _ = writeln!(out, "{line}");
                let _ = out.flush();
            }
        }
    }
}
