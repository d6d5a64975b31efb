//! Harness-wide error type

use crate::lock::LockError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Lock error: {0}")]
    Lock(#[from] LockError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{operation} failed with status {status}: {body}")]
    UnexpectedStatus {
        operation: String,
        status: u16,
        body: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Authorization error: {0}")]
    Auth(String),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("SOAP error: {0}")]
    Soap(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("gRPC status: {0}")]
    Grpc(#[from] tonic::Status),

    #[error("gRPC transport error: {0}")]
    GrpcTransport(#[from] tonic::transport::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Timed out: {0}")]
    Timeout(String),
}

impl HarnessError {
    /// Status code of an unexpected HTTP response, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            HarnessError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;
