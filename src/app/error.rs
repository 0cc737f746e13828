use thiserror::Error;

use crate::DiError;

/// Errors that end the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("dependency injection failed: {0}")]
    Di(#[from] DiError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid listen address: {0}")]
    Addr(#[from] std::net::AddrParseError),

    #[error("telemetry setup failed: {0}")]
    Telemetry(String),
}
