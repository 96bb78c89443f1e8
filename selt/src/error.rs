//! Error handling for the selt CLI.

use thiserror::Error;

/// Errors raised by selt commands.
#[derive(Error, Debug)]
pub enum SeltError {
    /// Configuration loading or parsing failed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The reader rejected the input.
    #[error("Reader error: {0}")]
    Read(#[from] selc_read::ReadError),

    /// One or more checked files failed to read.
    #[error("one or more files failed to read")]
    CheckFailed,

    /// File or stdin access failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using SeltError.
pub type Result<T> = std::result::Result<T, SeltError>;
