//! Error types for the steganography pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while hiding or recovering a message.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad carrier, message, or option.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Payload plus sentinel does not fit in the carrier.
    #[error("Message too large: need {needed} bytes, max {max} bytes")]
    CapacityExceeded { needed: usize, max: usize },

    /// The whole carrier was scanned without finding the sentinel.
    #[error("No hidden message found in this image")]
    NoMessageFound,

    /// Encryption error.
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Decryption error (wrong password or corrupted data).
    #[error("Decryption failed: wrong password or corrupted data")]
    Decryption,

    /// The envelope is not the expected JSON structure.
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// Compressed payload is not a valid code stream.
    #[error("Compression error: {0}")]
    Compression(String),

    /// Recovered payload is not UTF-8 text.
    #[error("Recovered message is not valid UTF-8")]
    InvalidUtf8,

    /// Cancellation was requested mid-operation.
    #[error("Operation cancelled")]
    Cancelled,

    /// A background task died before producing a result.
    #[error("Worker error: {0}")]
    Worker(String),

    /// Image file could not be decoded or written.
    #[error("Image error: {0}")]
    Image(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}
