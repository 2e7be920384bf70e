//! Error types for the econodoc library.

use std::io;
use thiserror::Error;

/// Result type alias for econodoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while running an ingestion job.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An upstream source was unreachable or misbehaved.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// An upstream source answered with a non-success status code.
    #[error("Upstream returned {status} for {url}")]
    UpstreamStatus {
        /// HTTP status code
        status: u16,
        /// Request URL
        url: String,
    },

    /// Object storage put/get failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Status table put/query/update failed.
    #[error("Status store error: {0}")]
    StatusStore(String),

    /// Batch result consumption was attempted before the provider
    /// reported completion. The invocation must be retried later.
    #[error("Batch not completed: {0}")]
    BatchNotReady(String),

    /// The inference provider rejected a submission or lost a batch.
    #[error("Inference error: {0}")]
    Inference(String),

    /// A configuration value is structurally invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
