use std::io::Cursor;
use std::time::Duration;

use aptlink_codec::MessageRegistry;
use aptlink_frame::FrameReader;
use aptlink_transport::Transport;

use crate::cmd::{parse_hex, DecodeArgs};
use crate::exit::{frame_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_frame, OutputFormat};

/// Captured bytes are all present up front; a short read means truncation.
const CAPTURE_READ_TIMEOUT: Duration = Duration::from_millis(10);

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let bytes = parse_hex(&args.hex)?;
    if bytes.is_empty() {
        return Err(CliError::usage("no frame bytes given"));
    }
    let total = bytes.len() as u64;

    let registry = MessageRegistry::global();
    let mut transport = Transport::new(Cursor::new(bytes));

    while transport.get_ref().position() < total {
        let frame = FrameReader::new(&mut transport, registry)
            .read_frame_within(CAPTURE_READ_TIMEOUT)
            .map_err(|err| {
                if err.is_timeout() {
                    CliError::new(DATA_INVALID, format!("decode failed: truncated capture ({err})"))
                } else {
                    frame_error("decode failed", err)
                }
            })?;
        print_frame(&frame, format);
    }

    Ok(SUCCESS)
}
