//! Types from package `foo.bar`, including `foo.bar.example1`, the message the harness tests.

use super::fiz_baz;
use bytes::Bytes;
use protowire_codec::{map, Decoder, Encoder, Error, Message, WireType};
use std::collections::BTreeMap;

open_enum!(
    /// `foo.bar.AEnum1`
    AEnum1 { A = 0, B = 1, C = 2 }
);

/// `foo.bar.example2`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Example2 {
    pub aint32: i32,
}

impl Message for Example2 {
    fn merge_from(&mut self, decoder: &mut Decoder) -> Result<(), Error> {
        while !decoder.is_eof() {
            let tag = decoder.read_tag()?;
            match tag.field_number {
                1 => self.aint32 = decoder.read_var_i32()?,
                _ => decoder.skip_wire_type(tag.wire_type)?,
            }
        }
        Ok(())
    }

    fn write_to(&self, encoder: &mut Encoder) {
        if self.aint32 != 0 {
            encoder.write_tag(1, WireType::Varint);
            encoder.write_var_i32(self.aint32);
        }
    }
}

/// Types nested in `foo.bar.example1`.
pub mod example1 {
    use protowire_codec::{Decoder, Encoder, Error, Message, WireType};

    open_enum!(
        /// `foo.bar.example1.AEnum2`
        AEnum2 { C = 0, D = 1 }
    );

    /// `foo.bar.example1.example2`
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Example2 {
        pub astring: String,
    }

    impl Message for Example2 {
        fn merge_from(&mut self, decoder: &mut Decoder) -> Result<(), Error> {
            while !decoder.is_eof() {
                let tag = decoder.read_tag()?;
                match tag.field_number {
                    1 => self.astring = decoder.read_string()?,
                    _ => decoder.skip_wire_type(tag.wire_type)?,
                }
            }
            Ok(())
        }

        fn write_to(&self, encoder: &mut Encoder) {
            if !self.astring.is_empty() {
                encoder.write_tag(1, WireType::LengthDelimited);
                encoder.write_string(&self.astring);
            }
        }
    }

    /// oneof `aoneof`
    #[derive(Debug, Clone, PartialEq)]
    pub enum Aoneof {
        Oostring(String),
        Ooint(i32),
    }
}

/// `foo.bar.example1`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Example1 {
    pub adouble: f64,
    pub afloat: f32,
    pub aint32: i32,
    pub aint64: i64,
    pub auint32: u32,
    pub auint64: u64,
    pub asint32: i32,
    pub asint64: i64,
    pub afixed32: u32,
    pub afixed64: u64,
    pub asfixed32: i32,
    pub asfixed64: i64,
    pub abool: bool,
    pub astring: String,
    pub abytes: Bytes,
    pub aenum1: AEnum1,
    pub aenum2: example1::AEnum2,
    pub aenum22: fiz_baz::AEnum2,
    pub manystring: Vec<String>,
    pub manyint64: Vec<i64>,
    pub aexample2: Option<example1::Example2>,
    pub aexample22: Option<Example2>,
    pub aexample23: Option<fiz_baz::Example2>,
    pub amap: BTreeMap<String, String>,
    pub outoforder: i64,
    pub aoneof: Option<example1::Aoneof>,
}

impl Message for Example1 {
    fn merge_from(&mut self, decoder: &mut Decoder) -> Result<(), Error> {
        while !decoder.is_eof() {
            let tag = decoder.read_tag()?;
            match tag.field_number {
                1 => self.adouble = decoder.read_double()?,
                2 => self.afloat = decoder.read_float()?,
                3 => self.aint32 = decoder.read_var_i32()?,
                4 => self.aint64 = decoder.read_varint_signed()?,
                5 => self.auint32 = decoder.read_var_u32()?,
                6 => self.auint64 = decoder.read_varint()?,
                7 => self.asint32 = decoder.read_zigzag32()?,
                8 => self.asint64 = decoder.read_zigzag64()?,
                9 => self.afixed32 = decoder.read_fixed32()?,
                10 => self.afixed64 = decoder.read_fixed64()?,
                11 => self.asfixed32 = decoder.read_sfixed32()?,
                12 => self.asfixed64 = decoder.read_sfixed64()?,
                13 => self.abool = decoder.read_bool()?,
                14 => self.astring = decoder.read_string()?,
                15 => self.abytes = decoder.read_bytes()?,
                16 => self.aenum1 = decoder.read_var_i32()?.into(),
                17 => self.aenum2 = decoder.read_var_i32()?.into(),
                18 => self.aenum22 = decoder.read_var_i32()?.into(),
                19 => self.manystring.push(decoder.read_string()?),
                20 => decoder.merge_repeated(
                    tag.wire_type,
                    WireType::Varint,
                    &mut self.manyint64,
                    Decoder::read_varint_signed,
                )?,
                21 => decoder.read_message(self.aexample2.get_or_insert_with(Default::default))?,
                22 => decoder.read_message(self.aexample22.get_or_insert_with(Default::default))?,
                23 => decoder.read_message(self.aexample23.get_or_insert_with(Default::default))?,
                24 => {
                    let (key, value) =
                        map::read_entry(decoder, Decoder::read_string, Decoder::read_string)?;
                    self.amap.insert(key, value);
                }
                50 => self.outoforder = decoder.read_varint_signed()?,
                60 => self.aoneof = Some(example1::Aoneof::Oostring(decoder.read_string()?)),
                61 => self.aoneof = Some(example1::Aoneof::Ooint(decoder.read_var_i32()?)),
                _ => decoder.skip_wire_type(tag.wire_type)?,
            }
        }
        Ok(())
    }

    fn write_to(&self, encoder: &mut Encoder) {
        // Compare float bits so that -0.0 is still written.
        if self.adouble.to_bits() != 0 {
            encoder.write_tag(1, WireType::Fixed64);
            encoder.write_double(self.adouble);
        }
        if self.afloat.to_bits() != 0 {
            encoder.write_tag(2, WireType::Fixed32);
            encoder.write_float(self.afloat);
        }
        if self.aint32 != 0 {
            encoder.write_tag(3, WireType::Varint);
            encoder.write_var_i32(self.aint32);
        }
        if self.aint64 != 0 {
            encoder.write_tag(4, WireType::Varint);
            encoder.write_varint_signed(self.aint64);
        }
        if self.auint32 != 0 {
            encoder.write_tag(5, WireType::Varint);
            encoder.write_var_u32(self.auint32);
        }
        if self.auint64 != 0 {
            encoder.write_tag(6, WireType::Varint);
            encoder.write_varint(self.auint64);
        }
        if self.asint32 != 0 {
            encoder.write_tag(7, WireType::Varint);
            encoder.write_zigzag32(self.asint32);
        }
        if self.asint64 != 0 {
            encoder.write_tag(8, WireType::Varint);
            encoder.write_zigzag64(self.asint64);
        }
        if self.afixed32 != 0 {
            encoder.write_tag(9, WireType::Fixed32);
            encoder.write_fixed32(self.afixed32);
        }
        if self.afixed64 != 0 {
            encoder.write_tag(10, WireType::Fixed64);
            encoder.write_fixed64(self.afixed64);
        }
        if self.asfixed32 != 0 {
            encoder.write_tag(11, WireType::Fixed32);
            encoder.write_sfixed32(self.asfixed32);
        }
        if self.asfixed64 != 0 {
            encoder.write_tag(12, WireType::Fixed64);
            encoder.write_sfixed64(self.asfixed64);
        }
        if self.abool {
            encoder.write_tag(13, WireType::Varint);
            encoder.write_bool(self.abool);
        }
        if !self.astring.is_empty() {
            encoder.write_tag(14, WireType::LengthDelimited);
            encoder.write_string(&self.astring);
        }
        if !self.abytes.is_empty() {
            encoder.write_tag(15, WireType::LengthDelimited);
            encoder.write_bytes(&self.abytes);
        }
        for (field_number, value) in [
            (16, i32::from(self.aenum1)),
            (17, i32::from(self.aenum2)),
            (18, i32::from(self.aenum22)),
        ] {
            if value != 0 {
                encoder.write_tag(field_number, WireType::Varint);
                encoder.write_var_i32(value);
            }
        }
        for value in &self.manystring {
            encoder.write_tag(19, WireType::LengthDelimited);
            encoder.write_string(value);
        }
        encoder.write_packed(20, &self.manyint64, |e, v| e.write_varint_signed(*v));
        if let Some(value) = &self.aexample2 {
            encoder.write_message(21, value);
        }
        if let Some(value) = &self.aexample22 {
            encoder.write_message(22, value);
        }
        if let Some(value) = &self.aexample23 {
            encoder.write_message(23, value);
        }
        for (key, value) in &self.amap {
            map::write_entry(
                encoder,
                24,
                |e| {
                    e.write_tag(map::KEY_FIELD, WireType::LengthDelimited);
                    e.write_string(key);
                },
                |e| {
                    e.write_tag(map::VALUE_FIELD, WireType::LengthDelimited);
                    e.write_string(value);
                },
            );
        }
        if self.outoforder != 0 {
            encoder.write_tag(50, WireType::Varint);
            encoder.write_varint_signed(self.outoforder);
        }
        match &self.aoneof {
            Some(example1::Aoneof::Oostring(value)) => {
                encoder.write_tag(60, WireType::LengthDelimited);
                encoder.write_string(value);
            }
            Some(example1::Aoneof::Ooint(value)) => {
                encoder.write_tag(61, WireType::Varint);
                encoder.write_var_i32(*value);
            }
            None => {}
        }
    }
}
