#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use protowire_codec::{wire::MAX_FIELD_NUMBER, Decoder, Encoder, WireType};

#[derive(Arbitrary, Debug, Clone, PartialEq)]
enum Value {
    Varint(u64),
    Int64(i64),
    Int32(i32),
    Uint32(u32),
    Sint32(i32),
    Sint64(i64),
    Bool(bool),
    Fixed32(u32),
    Sfixed32(i32),
    Float(u32), // bit pattern, so NaN payloads compare equal
    Fixed64(u64),
    Sfixed64(i64),
    Double(u64), // bit pattern
    Bytes(Vec<u8>),
    String(String),
    Packed(Vec<i64>),
}

#[derive(Arbitrary, Debug)]
struct Field {
    number: u32,
    value: Value,
}

impl Field {
    fn field_number(&self) -> u32 {
        self.number % MAX_FIELD_NUMBER + 1
    }

    fn wire_type(&self) -> WireType {
        match self.value {
            Value::Fixed32(_) | Value::Sfixed32(_) | Value::Float(_) => WireType::Fixed32,
            Value::Fixed64(_) | Value::Sfixed64(_) | Value::Double(_) => WireType::Fixed64,
            Value::Bytes(_) | Value::String(_) | Value::Packed(_) => WireType::LengthDelimited,
            _ => WireType::Varint,
        }
    }

    fn write(&self, encoder: &mut Encoder) {
        let number = self.field_number();
        if let Value::Packed(values) = &self.value {
            // An empty packed run writes nothing, so write an empty payload explicitly.
            if values.is_empty() {
                encoder.write_tag(number, WireType::LengthDelimited);
                encoder.write_bytes(&[]);
            } else {
                encoder.write_packed(number, values, |e, v| e.write_varint_signed(*v));
            }
            return;
        }
        encoder.write_tag(number, self.wire_type());
        match &self.value {
            Value::Varint(v) => encoder.write_varint(*v),
            Value::Int64(v) => encoder.write_varint_signed(*v),
            Value::Int32(v) => encoder.write_var_i32(*v),
            Value::Uint32(v) => encoder.write_var_u32(*v),
            Value::Sint32(v) => encoder.write_zigzag32(*v),
            Value::Sint64(v) => encoder.write_zigzag64(*v),
            Value::Bool(v) => encoder.write_bool(*v),
            Value::Fixed32(v) => encoder.write_fixed32(*v),
            Value::Sfixed32(v) => encoder.write_sfixed32(*v),
            Value::Float(v) => encoder.write_float(f32::from_bits(*v)),
            Value::Fixed64(v) => encoder.write_fixed64(*v),
            Value::Sfixed64(v) => encoder.write_sfixed64(*v),
            Value::Double(v) => encoder.write_double(f64::from_bits(*v)),
            Value::Bytes(v) => encoder.write_bytes(v),
            Value::String(v) => encoder.write_string(v),
            Value::Packed(_) => unreachable!("handled above"),
        }
    }

    fn read(&self, decoder: &mut Decoder) -> Value {
        let tag = decoder.read_tag().expect("tag");
        assert_eq!(tag.field_number, self.field_number());
        assert!(tag.is(self.wire_type()));
        match &self.value {
            Value::Varint(_) => Value::Varint(decoder.read_varint().unwrap()),
            Value::Int64(_) => Value::Int64(decoder.read_varint_signed().unwrap()),
            Value::Int32(_) => Value::Int32(decoder.read_var_i32().unwrap()),
            Value::Uint32(_) => Value::Uint32(decoder.read_var_u32().unwrap()),
            Value::Sint32(_) => Value::Sint32(decoder.read_zigzag32().unwrap()),
            Value::Sint64(_) => Value::Sint64(decoder.read_zigzag64().unwrap()),
            Value::Bool(_) => Value::Bool(decoder.read_bool().unwrap()),
            Value::Fixed32(_) => Value::Fixed32(decoder.read_fixed32().unwrap()),
            Value::Sfixed32(_) => Value::Sfixed32(decoder.read_sfixed32().unwrap()),
            Value::Float(_) => Value::Float(decoder.read_float().unwrap().to_bits()),
            Value::Fixed64(_) => Value::Fixed64(decoder.read_fixed64().unwrap()),
            Value::Sfixed64(_) => Value::Sfixed64(decoder.read_sfixed64().unwrap()),
            Value::Double(_) => Value::Double(decoder.read_double().unwrap().to_bits()),
            Value::Bytes(_) => Value::Bytes(decoder.read_bytes().unwrap().to_vec()),
            Value::String(_) => Value::String(decoder.read_string().unwrap()),
            Value::Packed(_) => {
                let mut values = Vec::new();
                decoder
                    .merge_repeated(
                        tag.wire_type,
                        WireType::Varint,
                        &mut values,
                        Decoder::read_varint_signed,
                    )
                    .unwrap();
                Value::Packed(values)
            }
        }
    }
}

fuzz_target!(|fields: Vec<Field>| {
    let mut encoder = Encoder::new();
    for field in &fields {
        field.write(&mut encoder);
    }
    let encoded = encoder.finish();

    let mut decoder = Decoder::new(encoded.clone());
    for field in &fields {
        assert_eq!(field.read(&mut decoder), field.value);
    }
    assert!(decoder.is_eof());

    // Skipping every field lands exactly on the end.
    let mut decoder = Decoder::new(encoded);
    for _ in &fields {
        let tag = decoder.read_tag().unwrap();
        decoder.skip_wire_type(tag.wire_type).unwrap();
    }
    assert!(decoder.is_eof());
});
