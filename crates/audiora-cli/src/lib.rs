//! audiora-cli library root.
//!
//! Re-exports the command bodies and config handling so integration tests
//! can exercise them without going through argument parsing.

pub mod commands;
pub mod config;
