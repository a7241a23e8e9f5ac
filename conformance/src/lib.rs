//! Drive the protowire codec from a conformance test runner.
//!
//! # Overview
//!
//! The runner writes length-prefixed `ConformanceRequest` frames to the testee's stdin and reads
//! length-prefixed `ConformanceResponse` frames from its stdout. Every frame is a 4-byte
//! little-endian length followed by that many bytes of a serialized message:
//!
//! ```text
//! +----------------+---------------------------+
//! | len (u32, LE)  | payload (len bytes)       |
//! +----------------+---------------------------+
//! ```
//!
//! [Harness] parses requests with the codec, decodes the embedded payload into
//! [messages::Example1], and answers with the re-encoded bytes. Requests it cannot satisfy
//! (other message types, JSON or text payloads, non-binary output) are answered with `skipped`,
//! and a payload that fails to decode is answered with `parse_error`.
//!
//! # Example
//!
//! ```rust
//! use bytes::Bytes;
//! use protowire_conformance::{
//!     messages::{ConformanceRequest, Outcome, Payload, WireFormat},
//!     Harness,
//! };
//!
//! let request = ConformanceRequest {
//!     payload: Some(Payload::Protobuf(Bytes::from_static(b"\x72\x06foobar"))),
//!     requested_output_format: WireFormat::Protobuf,
//!     message_type: "foo.bar.example1".into(),
//!     ..Default::default()
//! };
//! let response = Harness::default().handle(&request);
//! assert_eq!(
//!     response.result,
//!     Some(Outcome::ProtobufPayload(Bytes::from_static(b"\x72\x06foobar")))
//! );
//! ```

pub mod error;
pub mod escape;
pub mod harness;
pub mod messages;

pub use error::Error;
pub use harness::{Config, Harness};
