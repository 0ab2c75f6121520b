//! Port traits at the launcher's I/O seams.

pub mod config_port;
pub mod console_port;
pub mod process_port;
