//! Tags and wire types.
//!
//! Every encoded field starts with a tag: the varint `(field_number << 3) | wire_type`. The wire
//! type selects how the payload that follows is framed, which is all a decoder needs to skip a
//! field it does not recognize.

use crate::Error;

/// Number of low bits of a tag holding the wire type.
pub const WIRE_TYPE_BITS: u32 = 3;

/// Mask selecting the wire type from a tag.
pub const WIRE_TYPE_MASK: u64 = 0x07;

/// Largest field number a schema may declare (`2^29 - 1`).
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// Largest length-delimited payload accepted or produced (`2 GiB - 1`).
pub const MAX_LENGTH: u64 = i32::MAX as u64;

/// Payload framing of a field.
///
/// The deprecated group wire types (3 and 4) and the unassigned values 6 and 7 are not
/// represented and are rejected when skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    /// A base-128 varint (`int32`, `int64`, `uint32`, `uint64`, `sint32`, `sint64`, `bool`, enums).
    Varint = 0,
    /// Eight little-endian bytes (`fixed64`, `sfixed64`, `double`).
    Fixed64 = 1,
    /// A varint length followed by that many bytes (`string`, `bytes`, messages, packed fields).
    LengthDelimited = 2,
    /// Four little-endian bytes (`fixed32`, `sfixed32`, `float`).
    Fixed32 = 5,
}

impl TryFrom<u8> for WireType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Varint),
            1 => Ok(Self::Fixed64),
            2 => Ok(Self::LengthDelimited),
            5 => Ok(Self::Fixed32),
            other => Err(Error::UnknownWireType(other)),
        }
    }
}

impl From<WireType> for u8 {
    fn from(value: WireType) -> Self {
        value as u8
    }
}

/// A decoded field header.
///
/// The wire type is kept raw so that an unrecognized value only fails when the field is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    /// Field number, always at least 1.
    pub field_number: u32,
    /// Raw 3-bit wire type.
    pub wire_type: u8,
}

impl Tag {
    /// Splits a raw tag varint into its field number and wire type.
    ///
    /// Fails with [Error::InvalidTag] if the field number is 0 or above [MAX_FIELD_NUMBER].
    pub fn from_raw(raw: u64) -> Result<Self, Error> {
        let field_number = raw >> WIRE_TYPE_BITS;
        if field_number == 0 || field_number > u64::from(MAX_FIELD_NUMBER) {
            return Err(Error::InvalidTag(raw));
        }
        Ok(Self {
            field_number: field_number as u32,
            wire_type: (raw & WIRE_TYPE_MASK) as u8,
        })
    }

    /// Packs a field number and wire type into a raw tag value.
    pub fn raw(field_number: u32, wire_type: WireType) -> u64 {
        (u64::from(field_number) << WIRE_TYPE_BITS) | u64::from(u8::from(wire_type))
    }

    /// Returns `true` if the tag carries the given wire type.
    pub fn is(&self, wire_type: WireType) -> bool {
        self.wire_type == u8::from(wire_type)
    }
}
