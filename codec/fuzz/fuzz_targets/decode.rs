#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use protowire_codec::{unmarshal, Decoder, Encoder, Error, Message, MessageExt, WireType};

/// Nesting depth past which payloads are kept opaque.
const MAX_DEPTH: usize = 16;

/// Reads every field generically, treating length-delimited payloads as nested messages when
/// they parse as one.
#[derive(Debug, Default)]
struct Walker {
    varints: Vec<(u32, u64)>,
    fixed64: Vec<(u32, u64)>,
    fixed32: Vec<(u32, u32)>,
    payloads: Vec<(u32, Bytes)>,
    children: Vec<(u32, Walker)>,
    depth: usize,
}

impl Message for Walker {
    fn merge_from(&mut self, decoder: &mut Decoder) -> Result<(), Error> {
        while !decoder.is_eof() {
            let tag = decoder.read_tag()?;
            match WireType::try_from(tag.wire_type)? {
                WireType::Varint => self.varints.push((tag.field_number, decoder.read_varint()?)),
                WireType::Fixed64 => self
                    .fixed64
                    .push((tag.field_number, decoder.read_fixed64()?)),
                WireType::Fixed32 => self
                    .fixed32
                    .push((tag.field_number, decoder.read_fixed32()?)),
                WireType::LengthDelimited => {
                    let payload = decoder.read_bytes()?;
                    if self.depth >= MAX_DEPTH {
                        self.payloads.push((tag.field_number, payload));
                        continue;
                    }
                    let mut child = Walker {
                        depth: self.depth + 1,
                        ..Default::default()
                    };
                    match unmarshal(payload.clone(), &mut child) {
                        Ok(()) => self.children.push((tag.field_number, child)),
                        Err(_) => self.payloads.push((tag.field_number, payload)),
                    }
                }
            }
        }
        Ok(())
    }

    fn write_to(&self, encoder: &mut Encoder) {
        for (field, value) in &self.varints {
            encoder.write_tag(*field, WireType::Varint);
            encoder.write_varint(*value);
        }
        for (field, value) in &self.fixed64 {
            encoder.write_tag(*field, WireType::Fixed64);
            encoder.write_fixed64(*value);
        }
        for (field, value) in &self.fixed32 {
            encoder.write_tag(*field, WireType::Fixed32);
            encoder.write_fixed32(*value);
        }
        for (field, payload) in &self.payloads {
            encoder.write_tag(*field, WireType::LengthDelimited);
            encoder.write_bytes(payload);
        }
        for (field, child) in &self.children {
            encoder.write_message(*field, child);
        }
    }
}

fn count(walker: &Walker) -> usize {
    walker.varints.len()
        + walker.fixed64.len()
        + walker.fixed32.len()
        + walker.payloads.len()
        + walker.children.iter().map(|(_, c)| 1 + count(c)).sum::<usize>()
}

fuzz_target!(|data: &[u8]| {
    // Skipping must agree with full parsing on whether the input is well formed.
    let mut decoder = Decoder::copy_from_slice(data);
    let mut skipped = Ok(());
    while !decoder.is_eof() {
        if let Err(err) = decoder
            .read_tag()
            .and_then(|tag| decoder.skip_wire_type(tag.wire_type))
        {
            skipped = Err(err);
            break;
        }
    }

    let walked = Walker::decode(Bytes::copy_from_slice(data));
    assert_eq!(skipped.is_ok(), walked.is_ok());

    // Whatever parsed must survive a re-encode.
    if let Ok(walker) = walked {
        let again = Walker::decode(walker.encode()).expect("re-encoded input must decode");
        assert_eq!(count(&walker), count(&again));
    }
});
