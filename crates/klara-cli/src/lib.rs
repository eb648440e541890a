//! klara-cli library root.
//!
//! Re-exports the command modules so integration tests can drive them
//! without going through argument parsing.

pub mod config;
pub mod history;
pub mod interactive;
pub mod replay;
pub mod report;
