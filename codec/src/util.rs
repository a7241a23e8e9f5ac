//! Utility functions for internal use.

use crate::Error;
use bytes::Buf;

/// Checks that at least `len` bytes remain in the buffer.
#[inline]
pub fn at_least(buf: &impl Buf, len: usize) -> Result<(), Error> {
    let remaining = buf.remaining();
    if remaining < len {
        return Err(Error::BufferOverrun(len, remaining));
    }
    Ok(())
}
