//! Error types for colour and legend handling.

use thiserror::Error;

/// Result type for legend operations.
pub type LegendResult<T> = Result<T, LegendError>;

/// Error types for colour specifications and legends.
#[derive(Error, Debug)]
pub enum LegendError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No header line after the comment lines
    #[error("Error: no header line in the specification file")]
    MissingHeader,

    /// Header with fewer than identifier, description and colour model
    #[error("Error: Need at least 3 fields in the specification file, found {0}")]
    ShortHeader(usize),

    /// Colour model other than RGB or CMYK
    #[error("Unknown color model {0} [RGB or CMYK only]")]
    UnknownColorModel(String),

    /// Malformed entry line
    #[error("Invalid entry on line {line}: {reason}")]
    InvalidEntry { line: usize, reason: String },

    /// Colour text that cannot be parsed
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}
