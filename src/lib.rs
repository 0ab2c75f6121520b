//! perris-launcher — environment bootstrap and handoff for the Perris Sniper
//! trading bot.
//!
//! Hexagonal architecture: the gate sequence lives in [`domain`], I/O seams
//! are traits in [`ports`], concrete implementations in [`adapters`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;
