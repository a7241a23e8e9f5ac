//! Map fields.
//!
//! A `map<K, V>` field travels as a repeated submessage under the map's field number, each entry
//! holding the key as field 1 and the value as field 2. Decoders insert entries in order, so the
//! last occurrence of a key wins.

use crate::{Decoder, Encoder, Error};

/// Field number of an entry's key.
pub const KEY_FIELD: u32 = 1;

/// Field number of an entry's value.
pub const VALUE_FIELD: u32 = 2;

/// Decodes one map entry from the submessage at the cursor.
///
/// `read_key` and `read_value` read the payload of the key and value fields. A missing key or
/// value takes its default, and unknown entry fields are skipped.
pub fn read_entry<K: Default, V: Default>(
    decoder: &mut Decoder,
    mut read_key: impl FnMut(&mut Decoder) -> Result<K, Error>,
    mut read_value: impl FnMut(&mut Decoder) -> Result<V, Error>,
) -> Result<(K, V), Error> {
    let mut entry = decoder.read_sub_decoder()?;
    let mut key = K::default();
    let mut value = V::default();
    while !entry.is_eof() {
        let tag = entry.read_tag()?;
        match tag.field_number {
            KEY_FIELD => key = read_key(&mut entry)?,
            VALUE_FIELD => value = read_value(&mut entry)?,
            _ => entry.skip_wire_type(tag.wire_type)?,
        }
    }
    Ok((key, value))
}

/// Writes one map entry as field `field_number`.
///
/// `write_key` and `write_value` receive the entry encoder and must write their own tag
/// ([KEY_FIELD] and [VALUE_FIELD]) followed by the payload.
pub fn write_entry(
    encoder: &mut Encoder,
    field_number: u32,
    write_key: impl FnOnce(&mut Encoder),
    write_value: impl FnOnce(&mut Encoder),
) {
    encoder.write_with(field_number, |entry| {
        write_key(entry);
        write_value(entry);
    });
}
