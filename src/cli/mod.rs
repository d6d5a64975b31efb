//! CLI module for niffler-e2e

#[allow(clippy::module_inception)]
pub mod cli;
pub mod commands;
pub mod error;

pub use cli::Cli;
