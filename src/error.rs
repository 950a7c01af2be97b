//! Error types for Refract.

use thiserror::Error;

/// Result type alias using Refract's Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for conversion and scaling operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A buffer's length does not match its declared format.
    ///
    /// The frame is dropped without writing to the destination.
    #[error("frame size mismatch: got {actual} bytes, expected {expected}")]
    SizeMismatch {
        /// Byte count the declared format requires.
        expected: usize,
        /// Byte count actually supplied.
        actual: usize,
    },

    /// Invalid construction parameters or misallocated caller buffers.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Conversion or scaling pair outside the supported set.
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}
