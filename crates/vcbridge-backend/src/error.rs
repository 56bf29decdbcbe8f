//! Backend error types

use thiserror::Error;

/// Failure classes a backend operation can report.
///
/// `Connectivity` drives the engine's Offline transition and is recoverable
/// on the next command. Ordinary per-request rejections are not errors at
/// this level; backends accumulate them into the shared status list and
/// return `Ok(false)`.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Bad credentials, unreachable server, unknown workspace.
    #[error("Connectivity failure: {0}")]
    Connectivity(String),

    /// Unrecoverable backend defect; terminates the worker.
    #[error("Fatal backend failure: {0}")]
    Fatal(String),
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;
