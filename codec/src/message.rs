//! The contract between generated message types and the codec.

use crate::{Decoder, Encoder, Error};
use bytes::Bytes;

/// A structured value that can merge itself from, and write itself to, the wire format.
///
/// Implementations are normally emitted by a schema compiler. A typical `merge_from` loops until
/// the decoder is exhausted, dispatching on field number:
///
/// ```
/// use protowire_codec::{Decoder, Encoder, Error, Message, WireType};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Point {
///     x: i32,
///     labels: Vec<String>,
/// }
///
/// impl Message for Point {
///     fn merge_from(&mut self, decoder: &mut Decoder) -> Result<(), Error> {
///         while !decoder.is_eof() {
///             let tag = decoder.read_tag()?;
///             match tag.field_number {
///                 1 => self.x = decoder.read_var_i32()?,
///                 2 => self.labels.push(decoder.read_string()?),
///                 _ => decoder.skip_wire_type(tag.wire_type)?,
///             }
///         }
///         Ok(())
///     }
///
///     fn write_to(&self, encoder: &mut Encoder) {
///         if self.x != 0 {
///             encoder.write_tag(1, WireType::Varint);
///             encoder.write_var_i32(self.x);
///         }
///         for label in &self.labels {
///             encoder.write_tag(2, WireType::LengthDelimited);
///             encoder.write_string(label);
///         }
///     }
/// }
///
/// let point = Point { x: -3, labels: vec!["a".into()] };
/// let mut decoded = Point::default();
/// protowire_codec::unmarshal(protowire_codec::marshal(&point), &mut decoded).unwrap();
/// assert_eq!(point, decoded);
/// ```
pub trait Message {
    /// Merges every field in `decoder` into `self`.
    ///
    /// Scalars are overwritten (last value wins), repeated fields are appended to, and embedded
    /// messages are merged recursively. Unrecognized fields are skipped and discarded.
    ///
    /// On error, fields merged before the failing field remain applied.
    fn merge_from(&mut self, decoder: &mut Decoder) -> Result<(), Error>;

    /// Writes every present field of `self` to `encoder`.
    fn write_to(&self, encoder: &mut Encoder);
}

/// Merges the encoded message `raw` into `target`.
pub fn unmarshal<M: Message + ?Sized>(raw: impl Into<Bytes>, target: &mut M) -> Result<(), Error> {
    let mut decoder = Decoder::new(raw);
    target.merge_from(&mut decoder)
}

/// Encodes `message`.
pub fn marshal<M: Message + ?Sized>(message: &M) -> Bytes {
    let mut encoder = Encoder::new();
    message.write_to(&mut encoder);
    encoder.finish()
}

/// Extension trait providing ergonomic decode and encode methods for messages.
pub trait MessageExt: Message + Default {
    /// Decodes a fresh instance from `raw`.
    ///
    /// (Provided method).
    fn decode(raw: impl Into<Bytes>) -> Result<Self, Error> {
        let mut message = Self::default();
        unmarshal(raw, &mut message)?;
        Ok(message)
    }

    /// Encodes `self`.
    ///
    /// (Provided method).
    fn encode(&self) -> Bytes {
        marshal(self)
    }
}

// Automatically implement `MessageExt` for messages with a default value.
impl<T: Message + Default> MessageExt for T {}
