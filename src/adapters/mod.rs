//! Concrete adapter implementations for ports.

pub mod ansi_console;
pub mod file_config_adapter;
pub mod system_process;
