//! protowire conformance testee

use clap::{Arg, ArgAction, Command};
use protowire_conformance::harness::{Config, Harness, SUPPORTED_MESSAGE_TYPE};
use std::process::ExitCode;
use tracing::{error, info};

/// Returns the version of the crate.
pub const fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Flag for verbose output
const VERBOSE_FLAG: &str = "verbose";

/// Flag for the maximum request frame size
const MAX_FRAME_SIZE_FLAG: &str = "max-frame-size";

/// Default for [MAX_FRAME_SIZE_FLAG] (64 MiB)
const DEFAULT_MAX_FRAME_SIZE: &str = "67108864";

/// Flag for the message type used in debug mode
const MESSAGE_TYPE_FLAG: &str = "message-type";

/// Positional escaped payload that selects debug mode
const PAYLOAD_ARG: &str = "payload";

fn main() -> ExitCode {
    // Define application
    let matches = Command::new("protowire-conformance")
        .version(crate_version())
        .about("Answer conformance test requests framed on stdin, or decode a single escaped payload.")
        .arg(
            Arg::new(VERBOSE_FLAG)
                .short('v')
                .long(VERBOSE_FLAG)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(MAX_FRAME_SIZE_FLAG)
                .long(MAX_FRAME_SIZE_FLAG)
                .default_value(DEFAULT_MAX_FRAME_SIZE)
                .help("Largest request frame to accept, in bytes (must be >= 1)")
                .value_parser(clap::builder::RangedU64ValueParser::<usize>::new().range(1..)),
        )
        .arg(
            Arg::new(MESSAGE_TYPE_FLAG)
                .long(MESSAGE_TYPE_FLAG)
                .default_value(SUPPORTED_MESSAGE_TYPE)
                .help("Message type to decode the payload as (debug mode only)"),
        )
        .arg(
            Arg::new(PAYLOAD_ARG)
                .value_name("PAYLOAD")
                .help("Escaped protobuf payload; when given, stdin is not read"),
        )
        .get_matches();

    // Create logger
    let level = if matches.get_flag(VERBOSE_FLAG) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let cfg = Config {
        max_frame_size: *matches.get_one::<usize>(MAX_FRAME_SIZE_FLAG).unwrap(),
    };
    let harness = Harness::new(cfg);

    // Debug mode
    if let Some(payload) = matches.get_one::<String>(PAYLOAD_ARG) {
        let message_type = matches.get_one::<String>(MESSAGE_TYPE_FLAG).unwrap();
        return match harness.debug_line(message_type, payload) {
            Ok(line) => {
                println!("{line}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(error=?e, "failed to handle payload");
                ExitCode::FAILURE
            }
        };
    }

    // Stream mode
    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    match harness.serve(stdin, stdout) {
        Ok(served) => {
            info!(served, "finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error=?e, "failed to serve requests");
            ExitCode::FAILURE
        }
    }
}
