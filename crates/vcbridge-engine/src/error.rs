//! Engine error types

use thiserror::Error;

use vcbridge_backend::BackendError;
use vcbridge_protocol::ProtocolError;

/// Engine-level errors. `Protocol` errors are fatal to the connection;
/// `NoHandler` and `Contract` indicate a build defect and are always fatal.
/// `Backend` connectivity failures are intercepted by the dispatcher and
/// never propagate out of it.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("No handler registered for command: {0}")]
    NoHandler(String),

    #[error("Request contract violated for handler: {0}")]
    Contract(&'static str),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
