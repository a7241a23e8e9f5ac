//! Encode and decode the Protocol Buffers binary wire format.
//!
//! # Overview
//!
//! The runtime that generated message types call into:
//! - [Decoder]: a cursor over an immutable byte span that reads tags, varints, ZigZag and
//!   fixed-width numbers, and length-delimited payloads, and skips fields it does not recognize
//! - [Encoder]: a growable buffer that writes the same primitives and splices in submessages
//!   built by independent child encoders
//! - [Message]: the `merge_from`/`write_to` contract every generated type implements
//! - [unmarshal] and [marshal]: drive a [Message] through a fresh [Decoder] or [Encoder]
//!
//! Decoding untrusted input never panics and never reads out of bounds: every malformed input
//! is rejected with an [Error]. Unknown fields are skipped and discarded, so re-encoding a
//! decoded message drops them.
//!
//! # Wire Types
//!
//! | Wire type | Id | Used for |
//! |---|---|---|
//! | [WireType::Varint] | 0 | `int32`, `int64`, `uint32`, `uint64`, `sint32`, `sint64`, `bool`, enums |
//! | [WireType::Fixed64] | 1 | `fixed64`, `sfixed64`, `double` |
//! | [WireType::LengthDelimited] | 2 | `string`, `bytes`, messages, maps, packed repeated fields |
//! | [WireType::Fixed32] | 5 | `fixed32`, `sfixed32`, `float` |
//!
//! # Example
//!
//! ```
//! use protowire_codec::{Decoder, Encoder, Error, MessageExt, Message, WireType};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Inner {
//!     astring: String,
//! }
//!
//! impl Message for Inner {
//!     fn merge_from(&mut self, decoder: &mut Decoder) -> Result<(), Error> {
//!         while !decoder.is_eof() {
//!             let tag = decoder.read_tag()?;
//!             match tag.field_number {
//!                 1 => self.astring = decoder.read_string()?,
//!                 _ => decoder.skip_wire_type(tag.wire_type)?,
//!             }
//!         }
//!         Ok(())
//!     }
//!
//!     fn write_to(&self, encoder: &mut Encoder) {
//!         if !self.astring.is_empty() {
//!             encoder.write_tag(1, WireType::LengthDelimited);
//!             encoder.write_string(&self.astring);
//!         }
//!     }
//! }
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Outer {
//!     adouble: f64,
//!     inner: Option<Inner>,
//! }
//!
//! impl Message for Outer {
//!     fn merge_from(&mut self, decoder: &mut Decoder) -> Result<(), Error> {
//!         while !decoder.is_eof() {
//!             let tag = decoder.read_tag()?;
//!             match tag.field_number {
//!                 1 => self.adouble = decoder.read_double()?,
//!                 2 => decoder.read_message(self.inner.get_or_insert_with(Inner::default))?,
//!                 _ => decoder.skip_wire_type(tag.wire_type)?,
//!             }
//!         }
//!         Ok(())
//!     }
//!
//!     fn write_to(&self, encoder: &mut Encoder) {
//!         if self.adouble != 0.0 {
//!             encoder.write_tag(1, WireType::Fixed64);
//!             encoder.write_double(self.adouble);
//!         }
//!         if let Some(inner) = &self.inner {
//!             encoder.write_message(2, inner);
//!         }
//!     }
//! }
//!
//! let outer = Outer {
//!     adouble: 13.37,
//!     inner: Some(Inner { astring: "zomg".into() }),
//! };
//! let encoded = outer.encode();
//! assert_eq!(Outer::decode(encoded).unwrap(), outer);
//! ```

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod map;
pub mod message;
pub mod util;
pub mod varint;
pub mod wire;

// Re-export main types and traits
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::Error;
pub use message::{marshal, unmarshal, Message, MessageExt};
pub use wire::{Tag, WireType};
