//! Error types for the bridge.

use std::any::Any;
use thiserror::Error;

/// Main error type for marshaling and logging operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Buffer shape violates a caller-controlled contract
    #[error("{0}")]
    InvalidShape(String),

    /// Failure reported by the solver collaborator
    #[error("{0}")]
    Solver(String),

    /// Dispatch into the host logging subsystem failed
    #[error("Host logging failed: {0}")]
    HostForward(String),

    /// Unrecognized log level name
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create a shape error.
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::InvalidShape(msg.into())
    }

    /// Create a solver failure.
    pub fn solver(msg: impl Into<String>) -> Self {
        Self::Solver(msg.into())
    }

    /// Create a host forwarding error.
    pub fn host(msg: impl Into<String>) -> Self {
        Self::HostForward(msg.into())
    }
}

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Best-effort text of a caught panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<String>()
        .map(|s| s.as_str())
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("Unknown error")
        .to_string()
}
