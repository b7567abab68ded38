//! Table error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    /// The input bytes are not a well-formed CSV table (ragged rows,
    /// invalid UTF-8, or no header row).
    #[error("malformed tabular input: {0}")]
    Parse(String),

    /// Writing the table back to bytes failed.
    #[error("table serialization failed: {0}")]
    Serialize(String),

    /// A row or column reference outside the table's bounds.
    #[error("out of bounds: {0}")]
    OutOfBounds(String),
}
