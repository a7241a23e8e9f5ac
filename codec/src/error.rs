//! Error types for codec operations

use thiserror::Error;

/// Error type for decoding malformed input.
///
/// Encoding never fails, so every variant describes input that must be rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("buffer overrun: needed {0} bytes, {1} remaining")]
    BufferOverrun(usize, usize), // needed, remaining
    #[error("invalid tag: {0}")]
    InvalidTag(u64),
    #[error("unknown wire type: {0}")]
    UnknownWireType(u8),
    #[error("malformed length: {0}")]
    MalformedLength(u64),
    #[error("invalid varint")]
    InvalidVarint,
    #[error("invalid utf-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}
