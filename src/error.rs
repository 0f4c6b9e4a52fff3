//! Error types for the interval timer.

use thiserror::Error;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the library.
///
/// None of these ever stop a running countdown: audio failures are logged
/// and dropped, command failures are reported back to the operator.
#[derive(Error, Debug)]
pub enum Error {
    #[error("No audio output device found")]
    NoOutputDevice,

    #[error("Audio output error: {0}")]
    AudioOutput(String),

    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid argument for `{command}`: {value}")]
    InvalidArgument { command: String, value: String },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
