//! LITE codec error types

use crate::FourCc;
use crate::payload::PayloadKind;

/// Errors raised while decoding, encoding or editing a LITE chunk
#[derive(Debug, thiserror::Error)]
pub enum LiteError {
    /// Chunk tag did not match while strict checking was enabled
    #[error("Invalid tag read: '{actual}'; expected: '{expected}'; at 0x{offset:08X}")]
    Format {
        actual: FourCc,
        expected: FourCc,
        /// Stream position just after the tag was read
        offset: u64,
    },

    /// A float sequence had the wrong number of values for its field
    #[error("{field}: must provide {expected} values (got {actual})")]
    Argument {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Payload variant does not match the record's light source type
    #[error("Payload type mismatch: record holds {expected} data, got {actual}")]
    TypeMismatch {
        expected: PayloadKind,
        actual: PayloadKind,
    },

    /// Bounded list is full
    #[error("List capacity exceeded (max {capacity} elements)")]
    Capacity { capacity: usize },

    /// Index past the end of a bounded list
    #[error("Index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Byte source or sink failure (including truncated input)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, LiteError>;
