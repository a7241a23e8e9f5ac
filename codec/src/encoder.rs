//! Append-only writer producing an encoded message.
//!
//! Submessages are always built in their own child [Encoder] and spliced into the parent,
//! length-prefixed, once complete. A child never shares storage with its parent.

use crate::{
    varint,
    wire::{Tag, WireType, MAX_FIELD_NUMBER, MAX_LENGTH},
    Message,
};
use bytes::{BufMut, Bytes, BytesMut};

/// Capacity of a fresh encoder.
pub const INITIAL_CAPACITY: usize = 64;

/// Generates fixed-width little-endian writers.
macro_rules! impl_fixed_write {
    ($(#[$doc:meta])* $name:ident, $type:ty, $put:ident) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self, value: $type) {
            self.reserve(std::mem::size_of::<$type>());
            self.buf.$put(value);
        }
    };
}

/// Growable byte accumulator.
///
/// Capacity doubles until it covers each write, so appends are amortized O(1). The used prefix
/// is exposed by [Encoder::buffer] and [Encoder::finish]; spare capacity never is.
#[derive(Debug, Clone)]
pub struct Encoder {
    buf: BytesMut,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    /// Creates an empty encoder with [INITIAL_CAPACITY] bytes of storage.
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates an empty encoder with at least `capacity` bytes of storage.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Number of bytes written.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes of storage currently allocated.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// The bytes written so far.
    #[inline]
    pub fn buffer(&self) -> &[u8] {
        &self.buf[..]
    }

    /// Consumes the encoder, returning the bytes written.
    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }

    /// Ensures room for `additional` more bytes, doubling capacity until it suffices.
    fn reserve(&mut self, additional: usize) {
        let needed = self.buf.len() + additional;
        if needed <= self.buf.capacity() {
            return;
        }
        let mut capacity = self.buf.capacity().max(INITIAL_CAPACITY);
        while capacity < needed {
            capacity *= 2;
        }
        self.buf.reserve(capacity - self.buf.len());
    }

    /// Writes an unsigned varint.
    pub fn write_varint(&mut self, value: u64) {
        self.reserve(varint::size(value));
        varint::write(value, &mut self.buf);
    }

    /// Writes an `int64` as the varint of its two's-complement bits.
    ///
    /// Negative values always take 10 bytes.
    #[inline]
    pub fn write_varint_signed(&mut self, value: i64) {
        self.write_varint(value as u64);
    }

    /// Writes a `uint32` varint.
    #[inline]
    pub fn write_var_u32(&mut self, value: u32) {
        self.write_varint(u64::from(value));
    }

    /// Writes an `int32` varint, sign-extending negative values to 64 bits.
    #[inline]
    pub fn write_var_i32(&mut self, value: i32) {
        self.write_varint_signed(i64::from(value));
    }

    /// Writes a field header.
    #[inline]
    pub fn write_tag(&mut self, field_number: u32, wire_type: WireType) {
        debug_assert!(
            (1..=MAX_FIELD_NUMBER).contains(&field_number),
            "field number {field_number} out of range"
        );
        self.write_varint(Tag::raw(field_number, wire_type));
    }

    /// Writes a ZigZag-encoded `sint32`.
    pub fn write_zigzag32(&mut self, value: i32) {
        self.reserve(varint::size_signed::<u32, i32>(value));
        varint::write_signed::<u32, i32>(value, &mut self.buf);
    }

    /// Writes a ZigZag-encoded `sint64`.
    pub fn write_zigzag64(&mut self, value: i64) {
        self.reserve(varint::size_signed::<u64, i64>(value));
        varint::write_signed::<u64, i64>(value, &mut self.buf);
    }

    /// Writes a `bool` as a one-byte varint.
    #[inline]
    pub fn write_bool(&mut self, value: bool) {
        self.write_varint(u64::from(value));
    }

    impl_fixed_write!(
        /// Writes a `fixed32`.
        write_fixed32, u32, put_u32_le
    );
    impl_fixed_write!(
        /// Writes an `sfixed32`.
        write_sfixed32, i32, put_i32_le
    );
    impl_fixed_write!(
        /// Writes a `float`.
        write_float, f32, put_f32_le
    );
    impl_fixed_write!(
        /// Writes a `fixed64`.
        write_fixed64, u64, put_u64_le
    );
    impl_fixed_write!(
        /// Writes an `sfixed64`.
        write_sfixed64, i64, put_i64_le
    );
    impl_fixed_write!(
        /// Writes a `double`.
        write_double, f64, put_f64_le
    );

    /// Writes a length prefix followed by `value`.
    ///
    /// Panics if `value` is longer than [MAX_LENGTH].
    pub fn write_bytes(&mut self, value: &[u8]) {
        let len = value.len() as u64;
        assert!(len <= MAX_LENGTH, "length-delimited payload exceeds 2 GiB");
        self.write_varint(len);
        self.reserve(value.len());
        self.buf.put_slice(value);
    }

    /// Writes a length prefix followed by the UTF-8 bytes of `value`.
    #[inline]
    pub fn write_string(&mut self, value: &str) {
        self.write_bytes(value.as_bytes());
    }

    /// Splices a finished child encoder in as field `field_number`.
    pub fn write_sub_encoder(&mut self, field_number: u32, child: Encoder) {
        self.write_tag(field_number, WireType::LengthDelimited);
        self.write_bytes(child.buffer());
    }

    /// Builds a submessage with `build` in a child encoder and writes it as field `field_number`.
    pub fn write_with(&mut self, field_number: u32, build: impl FnOnce(&mut Encoder)) {
        let mut child = Encoder::new();
        build(&mut child);
        self.write_sub_encoder(field_number, child);
    }

    /// Writes `message` as the embedded message field `field_number`.
    pub fn write_message<M: Message + ?Sized>(&mut self, field_number: u32, message: &M) {
        self.write_with(field_number, |child| message.write_to(child));
    }

    /// Writes a repeated scalar field as one packed run. Nothing is written for an empty slice.
    pub fn write_packed<T>(
        &mut self,
        field_number: u32,
        values: &[T],
        mut write: impl FnMut(&mut Encoder, &T),
    ) {
        if values.is_empty() {
            return;
        }
        self.write_with(field_number, |child| {
            for value in values {
                write(child, value);
            }
        });
    }
}
