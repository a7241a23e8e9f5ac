//! Request policy and the framed stdin/stdout loop.

use crate::{
    escape,
    messages::{
        ConformanceRequest, ConformanceResponse, Example1, FailureSet, Outcome, Payload,
        TestCategory, WireFormat,
    },
    Error,
};
use bytes::Bytes;
use protowire_codec::{marshal, unmarshal, MessageExt};
use std::io::{ErrorKind, Read, Write};
use tracing::{debug, info, warn};

/// The only test message the harness can parse.
pub const SUPPORTED_MESSAGE_TYPE: &str = "foo.bar.example1";

/// The message type the runner asks for before sending any test case.
pub const FAILURE_SET_MESSAGE_TYPE: &str = "conformance.FailureSet";

/// Default upper bound on a single request frame.
pub const DEFAULT_MAX_FRAME_SIZE: usize = 64 * 1024 * 1024;

/// Size of the little-endian length prefix on every frame.
const FRAME_PREFIX_LEN: usize = 4;

/// Configuration for a [Harness].
#[derive(Debug, Clone)]
pub struct Config {
    /// Frames declaring a larger length are rejected with [Error::FrameTooLarge].
    pub max_frame_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }
}

/// Answers conformance requests with the codec.
#[derive(Debug, Clone, Default)]
pub struct Harness {
    cfg: Config,
}

impl Harness {
    pub fn new(cfg: Config) -> Self {
        Self { cfg }
    }

    /// Produces the response for a single request.
    ///
    /// Decode failures of the embedded payload become `parse_error` responses rather than
    /// errors.
    pub fn handle(&self, request: &ConformanceRequest) -> ConformanceResponse {
        if request.message_type == FAILURE_SET_MESSAGE_TYPE {
            return ConformanceResponse::new(Outcome::ProtobufPayload(marshal(
                &FailureSet::default(),
            )));
        }
        if request.message_type != SUPPORTED_MESSAGE_TYPE {
            return skipped(format!(
                "unsupported message type: {}",
                request.message_type
            ));
        }
        let payload = match &request.payload {
            Some(Payload::Protobuf(payload)) => payload.clone(),
            Some(other) => {
                return skipped(format!("unsupported input format: {:?}", other.format()))
            }
            None => return skipped("missing payload".into()),
        };
        if request.requested_output_format != WireFormat::Protobuf {
            return skipped(format!(
                "unsupported output format: {:?}",
                request.requested_output_format
            ));
        }

        let mut message = Example1::default();
        match unmarshal(payload, &mut message) {
            Ok(()) => ConformanceResponse::new(Outcome::ProtobufPayload(marshal(&message))),
            Err(err) => {
                warn!(?err, "failed to parse payload");
                ConformanceResponse::new(Outcome::ParseError(err.to_string()))
            }
        }
    }

    /// Decodes a serialized request, handles it, and returns the serialized response.
    pub fn handle_raw(&self, raw: Bytes) -> Result<Bytes, Error> {
        let request = ConformanceRequest::decode(raw)?;
        let response = self.handle(&request);
        debug!(
            message_type = %request.message_type,
            result = response.result.as_ref().map(Outcome::kind),
            "handled request"
        );
        Ok(response.encode())
    }

    /// Runs one escaped payload through the same path as a framed request, decoding it as
    /// `message_type`, and renders the response as a single line.
    pub fn debug_line(&self, message_type: &str, payload: &str) -> Result<String, Error> {
        let raw = escape::unescape(payload)?;
        let request = ConformanceRequest {
            payload: Some(Payload::Protobuf(Bytes::from(raw))),
            requested_output_format: WireFormat::Protobuf,
            message_type: message_type.to_string(),
            test_category: TestCategory::BinaryTest,
            print_unknown_fields: false,
        };
        let response = ConformanceResponse::decode(self.handle_raw(request.encode())?)?;
        let Some(outcome) = response.result else {
            return Ok("empty response".into());
        };
        let detail = match &outcome {
            Outcome::ProtobufPayload(bytes) => escape::escape(bytes),
            Outcome::ParseError(text)
            | Outcome::SerializeError(text)
            | Outcome::TimeoutError(text)
            | Outcome::RuntimeError(text)
            | Outcome::JsonPayload(text)
            | Outcome::JspbPayload(text)
            | Outcome::TextPayload(text)
            | Outcome::Skipped(text) => text.clone(),
        };
        Ok(format!("{}: {}", outcome.kind(), detail))
    }

    /// Serves length-prefixed requests from `reader` until it is exhausted, writing one
    /// length-prefixed response to `writer` per request.
    ///
    /// Returns the number of frames served.
    pub fn serve(&self, mut reader: impl Read, mut writer: impl Write) -> Result<usize, Error> {
        info!(max_frame_size = self.cfg.max_frame_size, "serving");
        let mut served = 0;
        loop {
            let mut prefix = [0u8; FRAME_PREFIX_LEN];
            match fill(&mut reader, &mut prefix)? {
                0 => break,
                FRAME_PREFIX_LEN => {}
                got => return Err(Error::TruncatedFrame(FRAME_PREFIX_LEN, got)),
            }
            let len = u32::from_le_bytes(prefix) as usize;
            if len > self.cfg.max_frame_size {
                return Err(Error::FrameTooLarge(len, self.cfg.max_frame_size));
            }
            debug!(len, "read frame header");

            let mut frame = vec![0u8; len];
            let got = fill(&mut reader, &mut frame)?;
            if got != len {
                return Err(Error::TruncatedFrame(len, got));
            }

            let response = self.handle_raw(Bytes::from(frame))?;
            let response_len = u32::try_from(response.len())
                .map_err(|_| Error::FrameTooLarge(response.len(), u32::MAX as usize))?;
            writer.write_all(&response_len.to_le_bytes())?;
            writer.write_all(&response)?;
            writer.flush()?;
            served += 1;
        }
        info!(served, "eof received");
        Ok(served)
    }
}

fn skipped(reason: String) -> ConformanceResponse {
    debug!(%reason, "skipping request");
    ConformanceResponse::new(Outcome::Skipped(reason))
}

/// Reads until `buf` is full or the reader is exhausted, returning the number of bytes read.
fn fill(reader: &mut impl Read, buf: &mut [u8]) -> Result<usize, Error> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(filled)
}
