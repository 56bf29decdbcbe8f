//! Protocol error types

use thiserror::Error;

/// Protocol-specific errors. All of these are fatal to the connection
/// except where the dispatcher explicitly recovers.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected end of stream")]
    UnexpectedEof,

    #[error("Line too long: {size} > {max}")]
    LineTooLong { size: usize, max: usize },

    #[error("Dangling escape at end of value")]
    DanglingEscape,

    #[error("Invalid escape sequence: \\{0}")]
    InvalidEscape(char),

    #[error("Malformed command line: {0}")]
    MalformedCommandLine(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid area bits: {0}")]
    InvalidArea(u32),

    #[error("Invalid count: {0}")]
    InvalidCount(String),

    #[error("Too many non-command lines (limit {0}), stream corrupt")]
    TooManyBogusLines(usize),

    #[error("Core error: {0}")]
    Core(#[from] vcbridge_core::Error),
}

/// Result type for protocol operations
pub type ProtocolResult<T> = Result<T, ProtocolError>;
