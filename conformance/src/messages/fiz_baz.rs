//! Types from package `fiz.baz`.

use protowire_codec::{Decoder, Encoder, Error, Message, WireType};

open_enum!(
    /// `fiz.baz.AEnum2`
    AEnum2 { Y = 0, Z = 1 }
);

/// `fiz.baz.example2`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Example2 {
    pub zomg: i32,
}

impl Message for Example2 {
    fn merge_from(&mut self, decoder: &mut Decoder) -> Result<(), Error> {
        while !decoder.is_eof() {
            let tag = decoder.read_tag()?;
            match tag.field_number {
                1 => self.zomg = decoder.read_var_i32()?,
                _ => decoder.skip_wire_type(tag.wire_type)?,
            }
        }
        Ok(())
    }

    fn write_to(&self, encoder: &mut Encoder) {
        if self.zomg != 0 {
            encoder.write_tag(1, WireType::Varint);
            encoder.write_var_i32(self.zomg);
        }
    }
}
