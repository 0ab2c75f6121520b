//! Launch planning and the bootstrap gates.

pub mod bootstrap;
pub mod config_validation;
pub mod error;
pub mod launch_config;
pub mod secrets;
