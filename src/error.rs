//! Failure kinds for the decode and encode paths.
//!
//! Every operation reports failure through its return value; there is no
//! global error channel, so independent cursors never interact.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The item extends past the end of the buffer. The cursor is left at
    /// its entry position, so the same decode can be retried once more
    /// bytes are available.
    #[error("insufficient data")]
    InsufficientData,

    /// The byte at the cursor is not an accepted tag for the requested
    /// decode.
    #[error("invalid tag 0x{tag:02x}")]
    InvalidTag { tag: u8 },

    /// The value decoded syntactically but does not fit the requested
    /// width, signedness or exactness.
    #[error("value out of range for the requested target")]
    OutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The length or count exceeds the largest available wire width.
    #[error("length {len} exceeds the largest wire width")]
    Overflow { len: u64 },
}
