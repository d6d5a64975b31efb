//! Command modules for CLI

pub mod locks;
pub mod stand;
pub mod token;
pub mod version;

use clap::Subcommand;
use niffler_e2e::{HarnessConfig, HarnessError};
use std::path::Path;

#[derive(Debug, Subcommand)]
#[command(about = "niffler-e2e commands")]
pub enum Commands {
    /// Inspect or clear the cross-process locks
    #[command(about = "List or clear harness locks")]
    Locks(locks::LocksArgs),

    /// Operations against the configured stand
    #[command(about = "Maintain the configured Niffler stand")]
    Stand(stand::StandArgs),

    /// Print an access token for the test user
    #[command(about = "Register the test user if needed and print an access token")]
    Token(token::TokenArgs),

    /// Show version information
    #[command(about = "Show version information")]
    Version(version::VersionArgs),
}

/// Full stand configuration from an explicit file or the default locations
pub(crate) fn load_config(path: Option<&Path>) -> Result<HarnessConfig, HarnessError> {
    match path {
        Some(path) => HarnessConfig::load_from(path),
        None => HarnessConfig::load(),
    }
}
