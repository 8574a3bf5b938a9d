//! Error types for varseek
//!
//! Defines all error types used throughout the library.
//!
//! Offset lookups never fail: unknown chromosomes and out-of-range positions
//! degrade to sentinel offsets instead. Errors here come from loading a
//! malformed index file, where silently producing a wrong offset would be
//! far worse than failing fast.

use thiserror::Error;

/// Errors that can occur while loading a tabix index
#[derive(Debug, Error)]
pub enum IndexError {
    /// File does not start with the tabix magic bytes
    #[error("Not a tabix index: expected magic \"TBI\\x01\", got {found:?}")]
    InvalidMagic { found: [u8; 4] },

    /// Format code outside the known set (0 = generic, 1 = SAM, 2 = VCF)
    #[error("Unknown index format code: {0}")]
    UnknownFormat(i32),

    /// Header field holding a value outside its valid range
    #[error("Invalid {field} in header: {value}")]
    InvalidHeaderField { field: &'static str, value: i32 },

    /// A count field that must be non-negative was negative
    #[error("Invalid {field} count: {value}")]
    InvalidCount { field: &'static str, value: i64 },

    /// Name block holds a different number of names than the header promised
    #[error("Reference name count mismatch: header declares {declared}, name block holds {found}")]
    NameCountMismatch { declared: usize, found: usize },

    /// Reference name bytes are not valid UTF-8
    #[error("Reference name at slot {slot} is not valid UTF-8")]
    InvalidName { slot: usize },

    /// Chunk with begin offset past its end offset
    #[error("Invalid chunk in bin {bin}: begin {begin:#x} > end {end:#x}")]
    InvalidChunk { bin: u32, begin: u64, end: u64 },

    /// Index ended before the declared structure was complete
    #[error("Truncated index: {0}")]
    Truncated(&'static str),

    /// I/O error while reading
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for index operations
pub type Result<T> = std::result::Result<T, IndexError>;
