//! CLI-specific error types

use niffler_e2e::{HarnessError, LockError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Harness(#[from] HarnessError),

    #[error("Lock error: {0}")]
    Lock(#[from] LockError),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl CliError {
    /// Process exit code: 2 for bad input or configuration, 1 for everything else
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_)
            | CliError::Validation(_)
            | CliError::Harness(HarnessError::Config(_))
            | CliError::Harness(HarnessError::ConfigSource(_)) => 2,
            _ => 1,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
