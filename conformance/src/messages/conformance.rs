//! Types from package `conformance`, exchanged with the test runner.

use bytes::Bytes;
use protowire_codec::{Decoder, Encoder, Error, Message, WireType};

open_enum!(
    /// Encoding of a payload.
    WireFormat {
        Unspecified = 0,
        Protobuf = 1,
        Json = 2,
        Jspb = 3,
        TextFormat = 4,
    }
);

open_enum!(
    /// Kind of test a request belongs to.
    TestCategory {
        UnspecifiedTest = 0,
        BinaryTest = 1,
        JsonTest = 2,
        JsonIgnoreUnknownParsingTest = 3,
        JspbTest = 4,
        TextFormatTest = 5,
    }
);

/// oneof `payload` of [ConformanceRequest].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Protobuf(Bytes),
    Json(String),
    Jspb(String),
    Text(String),
}

impl Payload {
    /// The encoding the payload is in.
    pub fn format(&self) -> WireFormat {
        match self {
            Self::Protobuf(_) => WireFormat::Protobuf,
            Self::Json(_) => WireFormat::Json,
            Self::Jspb(_) => WireFormat::Jspb,
            Self::Text(_) => WireFormat::TextFormat,
        }
    }
}

/// A single test case sent by the runner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConformanceRequest {
    pub payload: Option<Payload>,
    pub requested_output_format: WireFormat,
    pub message_type: String,
    pub test_category: TestCategory,
    pub print_unknown_fields: bool,
}

impl Message for ConformanceRequest {
    fn merge_from(&mut self, decoder: &mut Decoder) -> Result<(), Error> {
        while !decoder.is_eof() {
            let tag = decoder.read_tag()?;
            match tag.field_number {
                1 => self.payload = Some(Payload::Protobuf(decoder.read_bytes()?)),
                2 => self.payload = Some(Payload::Json(decoder.read_string()?)),
                3 => self.requested_output_format = decoder.read_var_i32()?.into(),
                4 => self.message_type = decoder.read_string()?,
                5 => self.test_category = decoder.read_var_i32()?.into(),
                7 => self.payload = Some(Payload::Jspb(decoder.read_string()?)),
                8 => self.payload = Some(Payload::Text(decoder.read_string()?)),
                9 => self.print_unknown_fields = decoder.read_bool()?,
                _ => decoder.skip_wire_type(tag.wire_type)?,
            }
        }
        Ok(())
    }

    fn write_to(&self, encoder: &mut Encoder) {
        match &self.payload {
            Some(Payload::Protobuf(value)) => {
                encoder.write_tag(1, WireType::LengthDelimited);
                encoder.write_bytes(value);
            }
            Some(Payload::Json(value)) => {
                encoder.write_tag(2, WireType::LengthDelimited);
                encoder.write_string(value);
            }
            Some(Payload::Jspb(value)) => {
                encoder.write_tag(7, WireType::LengthDelimited);
                encoder.write_string(value);
            }
            Some(Payload::Text(value)) => {
                encoder.write_tag(8, WireType::LengthDelimited);
                encoder.write_string(value);
            }
            None => {}
        }
        let format = i32::from(self.requested_output_format);
        if format != 0 {
            encoder.write_tag(3, WireType::Varint);
            encoder.write_var_i32(format);
        }
        if !self.message_type.is_empty() {
            encoder.write_tag(4, WireType::LengthDelimited);
            encoder.write_string(&self.message_type);
        }
        let category = i32::from(self.test_category);
        if category != 0 {
            encoder.write_tag(5, WireType::Varint);
            encoder.write_var_i32(category);
        }
        if self.print_unknown_fields {
            encoder.write_tag(9, WireType::Varint);
            encoder.write_bool(true);
        }
    }
}

/// oneof `result` of [ConformanceResponse].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The payload could not be parsed.
    ParseError(String),
    /// The parsed message could not be serialized.
    SerializeError(String),
    /// The test did not finish in time.
    TimeoutError(String),
    /// Any other failure inside the testee.
    RuntimeError(String),
    ProtobufPayload(Bytes),
    JsonPayload(String),
    JspbPayload(String),
    TextPayload(String),
    /// The testee does not support the request.
    Skipped(String),
}

impl Outcome {
    /// Name of the oneof member, as it appears in the schema.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ParseError(_) => "parse_error",
            Self::SerializeError(_) => "serialize_error",
            Self::TimeoutError(_) => "timeout_error",
            Self::RuntimeError(_) => "runtime_error",
            Self::ProtobufPayload(_) => "protobuf_payload",
            Self::JsonPayload(_) => "json_payload",
            Self::JspbPayload(_) => "jspb_payload",
            Self::TextPayload(_) => "text_payload",
            Self::Skipped(_) => "skipped",
        }
    }
}

/// The testee's answer to a [ConformanceRequest].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConformanceResponse {
    pub result: Option<Outcome>,
}

impl ConformanceResponse {
    /// Creates a response carrying `outcome`.
    pub fn new(outcome: Outcome) -> Self {
        Self {
            result: Some(outcome),
        }
    }
}

impl Message for ConformanceResponse {
    fn merge_from(&mut self, decoder: &mut Decoder) -> Result<(), Error> {
        while !decoder.is_eof() {
            let tag = decoder.read_tag()?;
            let outcome = match tag.field_number {
                1 => Outcome::ParseError(decoder.read_string()?),
                2 => Outcome::RuntimeError(decoder.read_string()?),
                3 => Outcome::ProtobufPayload(decoder.read_bytes()?),
                4 => Outcome::JsonPayload(decoder.read_string()?),
                5 => Outcome::Skipped(decoder.read_string()?),
                6 => Outcome::SerializeError(decoder.read_string()?),
                7 => Outcome::JspbPayload(decoder.read_string()?),
                8 => Outcome::TextPayload(decoder.read_string()?),
                9 => Outcome::TimeoutError(decoder.read_string()?),
                _ => {
                    decoder.skip_wire_type(tag.wire_type)?;
                    continue;
                }
            };
            self.result = Some(outcome);
        }
        Ok(())
    }

    fn write_to(&self, encoder: &mut Encoder) {
        let Some(outcome) = &self.result else {
            return;
        };
        let (field_number, text) = match outcome {
            Outcome::ProtobufPayload(value) => {
                encoder.write_tag(3, WireType::LengthDelimited);
                encoder.write_bytes(value);
                return;
            }
            Outcome::ParseError(text) => (1, text),
            Outcome::RuntimeError(text) => (2, text),
            Outcome::JsonPayload(text) => (4, text),
            Outcome::Skipped(text) => (5, text),
            Outcome::SerializeError(text) => (6, text),
            Outcome::JspbPayload(text) => (7, text),
            Outcome::TextPayload(text) => (8, text),
            Outcome::TimeoutError(text) => (9, text),
        };
        encoder.write_tag(field_number, WireType::LengthDelimited);
        encoder.write_string(text);
    }
}

/// Tests the testee is expected to fail. The runner asks for it before any test case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FailureSet {
    pub failure: Vec<String>,
}

impl Message for FailureSet {
    fn merge_from(&mut self, decoder: &mut Decoder) -> Result<(), Error> {
        while !decoder.is_eof() {
            let tag = decoder.read_tag()?;
            match tag.field_number {
                1 => self.failure.push(decoder.read_string()?),
                _ => decoder.skip_wire_type(tag.wire_type)?,
            }
        }
        Ok(())
    }

    fn write_to(&self, encoder: &mut Encoder) {
        for failure in &self.failure {
            encoder.write_tag(1, WireType::LengthDelimited);
            encoder.write_string(failure);
        }
    }
}
