use std::io;
use thiserror::Error;

/// Custom error type for Virtual TV
#[derive(Error, Debug)]
pub enum VtvError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Probe failed for {path}: {reason}")]
    Probe { path: String, reason: String },

    #[error("Probe timed out after {secs}s: {path}")]
    ProbeTimeout { path: String, secs: u64 },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for Virtual TV
pub type Result<T> = std::result::Result<T, VtvError>;

impl VtvError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        VtvError::Config(msg.into())
    }

    /// Create a store error
    pub fn store<S: Into<String>>(msg: S) -> Self {
        VtvError::Store(msg.into())
    }

    /// Create a probe error for a given file
    pub fn probe<P: Into<String>, S: Into<String>>(path: P, reason: S) -> Self {
        VtvError::Probe {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn probe_timeout<P: Into<String>>(path: P, secs: u64) -> Self {
        VtvError::ProbeTimeout {
            path: path.into(),
            secs,
        }
    }

    /// Create an invalid path error
    pub fn invalid_path<S: Into<String>>(msg: S) -> Self {
        VtvError::InvalidPath(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        VtvError::Other(msg.into())
    }
}
