#![allow(dead_code)]

use perris_launcher::domain::launch_config::LaunchConfig;
use perris_launcher::ports::console_port::{ConsolePort, Severity};
use perris_launcher::ports::process_port::{CapturedRun, CommandSpec, ProcessPort};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const TEMPLATE_BODY: &str = "BINANCE_API_KEY=your_api_key\nBINANCE_API_SECRET=your_api_secret\n";
pub const SECRETS_BODY: &str = "BINANCE_API_KEY=live-key\nBINANCE_API_SECRET=live-secret\n";

/// In-memory process port that records every call.
pub struct MockProcess {
    pub executables: HashMap<String, PathBuf>,
    pub install_result: Result<CapturedRun, String>,
    pub handoff_result: Result<i32, String>,
    pub installs: RefCell<Vec<CommandSpec>>,
    pub handoffs: RefCell<Vec<CommandSpec>>,
}

impl MockProcess {
    pub fn new() -> Self {
        Self {
            executables: HashMap::new(),
            install_result: Ok(CapturedRun {
                success: true,
                code: Some(0),
                ..CapturedRun::default()
            }),
            handoff_result: Ok(0),
            installs: RefCell::new(Vec::new()),
            handoffs: RefCell::new(Vec::new()),
        }
    }

    /// A mock with `python3` on the path.
    pub fn with_python() -> Self {
        Self::new().with_executable("python3", "/usr/bin/python3")
    }

    pub fn with_executable(mut self, name: &str, path: &str) -> Self {
        self.executables.insert(name.to_string(), PathBuf::from(path));
        self
    }

    pub fn failing_install(mut self, code: i32, stderr: &str) -> Self {
        self.install_result = Ok(CapturedRun {
            success: false,
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.to_string(),
        });
        self
    }

    pub fn unspawnable_install(mut self, reason: &str) -> Self {
        self.install_result = Err(reason.to_string());
        self
    }

    pub fn failing_handoff(mut self, reason: &str) -> Self {
        self.handoff_result = Err(reason.to_string());
        self
    }

    pub fn install_count(&self) -> usize {
        self.installs.borrow().len()
    }

    pub fn handoff_count(&self) -> usize {
        self.handoffs.borrow().len()
    }
}

impl ProcessPort for MockProcess {
    fn resolve(&self, program: &Path) -> Option<PathBuf> {
        self.executables.get(program.to_str()?).cloned()
    }

    fn run_captured(&self, command: &CommandSpec) -> std::io::Result<CapturedRun> {
        self.installs.borrow_mut().push(command.clone());
        self.install_result.clone().map_err(std::io::Error::other)
    }

    fn hand_off(&self, command: &CommandSpec) -> std::io::Result<i32> {
        self.handoffs.borrow_mut().push(command.clone());
        self.handoff_result.clone().map_err(std::io::Error::other)
    }
}

/// Console port that keeps every message for assertions.
#[derive(Default)]
pub struct RecordingConsole {
    pub messages: RefCell<Vec<(Severity, String)>>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_severity(&self, severity: Severity) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> Vec<String> {
        self.with_severity(Severity::Warning)
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages.borrow().iter().any(|(_, m)| m.contains(needle))
    }
}

impl ConsolePort for RecordingConsole {
    fn emit(&self, severity: Severity, message: &str) {
        self.messages
            .borrow_mut()
            .push((severity, message.to_string()));
    }
}

/// A scratch bot checkout: manifest and template present, no secrets file.
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("requirements.txt"), "ccxt>=4.0\npandas\n").unwrap();
        fs::write(dir.path().join(".env.example"), TEMPLATE_BODY).unwrap();
        fs::write(dir.path().join("main.py"), "print('bot')\n").unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> LaunchConfig {
        LaunchConfig::with_project_dir(self.path())
    }

    pub fn secrets_path(&self) -> PathBuf {
        self.path().join(".env")
    }

    pub fn template_path(&self) -> PathBuf {
        self.path().join(".env.example")
    }

    pub fn with_secrets(self, body: &str) -> Self {
        fs::write(self.secrets_path(), body).unwrap();
        self
    }

    pub fn without_template(self) -> Self {
        fs::remove_file(self.template_path()).unwrap();
        self
    }

    pub fn without_manifest(self) -> Self {
        fs::remove_file(self.path().join("requirements.txt")).unwrap();
        self
    }

    pub fn write(&self, name: &str, body: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    pub fn read_secrets(&self) -> String {
        fs::read_to_string(self.secrets_path()).unwrap()
    }
}
