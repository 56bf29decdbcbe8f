//! Error types for VCBridge Core

use thiserror::Error;

/// Core error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid asset state bits: {0}")]
    InvalidStateBits(u32),

    #[error("Invalid resolve method: {0}")]
    InvalidResolveMethod(String),

    #[error("Invalid file mode: {0}")]
    InvalidFileMode(String),

    #[error("Empty asset path")]
    EmptyPath,
}

/// Result type alias for VCBridge Core operations
pub type Result<T> = std::result::Result<T, Error>;
