use thiserror::Error;

/// Errors raised while serving the conformance protocol.
#[derive(Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("codec error: {0}")]
    Codec(#[from] protowire_codec::Error),
    #[error("frame too large: {0} bytes (max {1})")]
    FrameTooLarge(usize, usize),
    #[error("truncated frame: expected {0} bytes, got {1}")]
    TruncatedFrame(usize, usize),
    #[error("invalid escape: {0}")]
    InvalidEscape(String),
}
