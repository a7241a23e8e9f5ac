//! Sequential reader over an encoded message.
//!
//! A [Decoder] owns a cheaply clonable [Bytes] view and consumes it from the front. Every read
//! checks the remaining length before consuming anything, so a failed read never reads out of
//! bounds and never truncates silently.

use crate::{
    util::at_least,
    varint::{self, SInt},
    wire::{Tag, WireType, MAX_LENGTH},
    Error, Message,
};
use bytes::{Buf, Bytes};

/// Generates fixed-width little-endian readers.
macro_rules! impl_fixed_read {
    ($(#[$doc:meta])* $name:ident, $type:ty, $get:ident) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self) -> Result<$type, Error> {
            at_least(&self.buf, std::mem::size_of::<$type>())?;
            Ok(self.buf.$get())
        }
    };
}

/// Cursor over an immutable byte span.
///
/// Sub-decoders returned by [Decoder::read_sub_decoder] share the underlying allocation but
/// cover a disjoint range, so sibling submessages may be decoded independently (even on
/// different threads).
#[derive(Debug, Clone)]
pub struct Decoder {
    buf: Bytes,
    len: usize,
}

impl Decoder {
    /// Creates a decoder over `buf`.
    pub fn new(buf: impl Into<Bytes>) -> Self {
        let buf = buf.into();
        let len = buf.len();
        Self { buf, len }
    }

    /// Creates a decoder over a copy of `data`.
    pub fn copy_from_slice(data: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(data))
    }

    /// Returns `true` once every byte has been consumed.
    #[inline]
    pub fn is_eof(&self) -> bool {
        !self.buf.has_remaining()
    }

    /// Number of unread bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    /// Offset of the cursor from the start of this decoder's span.
    #[inline]
    pub fn position(&self) -> usize {
        self.len - self.buf.remaining()
    }

    /// Reads a field header.
    pub fn read_tag(&mut self) -> Result<Tag, Error> {
        Tag::from_raw(self.read_varint()?)
    }

    /// Reads an unsigned varint of up to 64 bits.
    #[inline]
    pub fn read_varint(&mut self) -> Result<u64, Error> {
        varint::read(&mut self.buf)
    }

    /// Reads a varint and reinterprets it as a two's-complement `int64`.
    #[inline]
    pub fn read_varint_signed(&mut self) -> Result<i64, Error> {
        Ok(self.read_varint()? as i64)
    }

    /// Reads a `uint32` varint, keeping the low 32 bits.
    #[inline]
    pub fn read_var_u32(&mut self) -> Result<u32, Error> {
        Ok(self.read_varint()? as u32)
    }

    /// Reads an `int32` varint, keeping the low 32 bits as two's complement.
    ///
    /// Negative values arrive sign-extended to 10 bytes.
    #[inline]
    pub fn read_var_i32(&mut self) -> Result<i32, Error> {
        Ok(self.read_varint()? as i32)
    }

    /// Reads a ZigZag-encoded `sint32`.
    pub fn read_zigzag32(&mut self) -> Result<i32, Error> {
        Ok(i32::un_zigzag(self.read_varint()? as u32))
    }

    /// Reads a ZigZag-encoded `sint64`.
    pub fn read_zigzag64(&mut self) -> Result<i64, Error> {
        varint::read_signed::<u64, i64>(&mut self.buf)
    }

    /// Reads a `bool`. Any non-zero varint is `true`.
    #[inline]
    pub fn read_bool(&mut self) -> Result<bool, Error> {
        Ok(self.read_varint()? != 0)
    }

    impl_fixed_read!(
        /// Reads a `fixed32`.
        read_fixed32, u32, get_u32_le
    );
    impl_fixed_read!(
        /// Reads an `sfixed32`.
        read_sfixed32, i32, get_i32_le
    );
    impl_fixed_read!(
        /// Reads a `float`.
        read_float, f32, get_f32_le
    );
    impl_fixed_read!(
        /// Reads a `fixed64`.
        read_fixed64, u64, get_u64_le
    );
    impl_fixed_read!(
        /// Reads an `sfixed64`.
        read_sfixed64, i64, get_i64_le
    );
    impl_fixed_read!(
        /// Reads a `double`.
        read_double, f64, get_f64_le
    );

    /// Reads a length prefix and checks that the payload it announces is present.
    fn read_length(&mut self) -> Result<usize, Error> {
        let len = self.read_varint()?;
        if len > MAX_LENGTH {
            return Err(Error::MalformedLength(len));
        }
        let len = usize::try_from(len).map_err(|_| Error::MalformedLength(len))?;
        at_least(&self.buf, len)?;
        Ok(len)
    }

    /// Reads a length-delimited `bytes` field without copying.
    pub fn read_bytes(&mut self) -> Result<Bytes, Error> {
        let len = self.read_length()?;
        Ok(self.buf.split_to(len))
    }

    /// Reads a length-delimited `string` field, validating UTF-8.
    pub fn read_string(&mut self) -> Result<String, Error> {
        let raw = self.read_bytes()?;
        Ok(std::str::from_utf8(&raw)?.to_owned())
    }

    /// Reads a length prefix and returns a decoder bounded to the payload it covers.
    pub fn read_sub_decoder(&mut self) -> Result<Decoder, Error> {
        Ok(Decoder::new(self.read_bytes()?))
    }

    /// Merges an embedded message into `message`.
    pub fn read_message<M: Message + ?Sized>(&mut self, message: &mut M) -> Result<(), Error> {
        let mut sub = self.read_sub_decoder()?;
        message.merge_from(&mut sub)
    }

    /// Appends one occurrence of a repeated scalar field to `values`.
    ///
    /// If the field arrived length-delimited while its elements use another wire type, the
    /// payload is a packed run and every element in it is appended. Otherwise a single element
    /// is read with `read`.
    pub fn merge_repeated<T>(
        &mut self,
        wire_type: u8,
        element: WireType,
        values: &mut Vec<T>,
        mut read: impl FnMut(&mut Decoder) -> Result<T, Error>,
    ) -> Result<(), Error> {
        let packed = wire_type == u8::from(WireType::LengthDelimited)
            && element != WireType::LengthDelimited;
        if !packed {
            values.push(read(self)?);
            return Ok(());
        }
        let mut run = self.read_sub_decoder()?;
        while !run.is_eof() {
            values.push(read(&mut run)?);
        }
        Ok(())
    }

    /// Advances past one field payload of the given wire type without interpreting it.
    ///
    /// Fails with [Error::UnknownWireType] for anything other than varint, 64-bit,
    /// length-delimited, or 32-bit, and with [Error::BufferOverrun] if the payload extends past
    /// the end of the buffer.
    pub fn skip_wire_type(&mut self, wire_type: u8) -> Result<(), Error> {
        match WireType::try_from(wire_type)? {
            WireType::Varint => {
                self.read_varint()?;
            }
            WireType::Fixed64 => self.skip(8)?,
            WireType::LengthDelimited => {
                let len = self.read_length()?;
                self.buf.advance(len);
            }
            WireType::Fixed32 => self.skip(4)?,
        }
        Ok(())
    }

    fn skip(&mut self, len: usize) -> Result<(), Error> {
        at_least(&self.buf, len)?;
        self.buf.advance(len);
        Ok(())
    }
}
