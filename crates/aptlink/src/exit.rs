use std::fmt;
use std::io;

use aptlink_codec::CodecError;
use aptlink_device::DeviceError;
use aptlink_frame::FrameError;
use aptlink_transport::TransportError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(USAGE, message)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::NotFound => TRANSPORT_ERROR,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn transport_error(context: &str, err: TransportError) -> CliError {
    match err {
        TransportError::Io(source) => io_error(context, source),
        TransportError::WriteTimeout { .. } => CliError::new(TIMEOUT, format!("{context}: {err}")),
        TransportError::ConnectionClosed => {
            CliError::new(TRANSPORT_ERROR, format!("{context}: {err}"))
        }
    }
}

pub fn codec_error(context: &str, err: CodecError) -> CliError {
    CliError::new(DATA_INVALID, format!("{context}: {err}"))
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Transport(err) => transport_error(context, err),
        FrameError::Codec(err) => codec_error(context, err),
        FrameError::Timeout { .. } => CliError::new(TIMEOUT, format!("{context}: {err}")),
        FrameError::InvalidAddress(_) => CliError::new(USAGE, format!("{context}: {err}")),
        FrameError::PayloadTooLarge { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
    }
}

pub fn device_error(context: &str, err: DeviceError) -> CliError {
    match err {
        DeviceError::Frame(err) => frame_error(context, err),
        DeviceError::Transport(err) => transport_error(context, err),
        DeviceError::MessageReceipt { .. }
        | DeviceError::InvalidStatus { .. }
        | DeviceError::UnexpectedBody { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use aptlink_frame::ReadStage;

    use super::*;

    #[test]
    fn timeouts_map_to_timeout_code() {
        let err = DeviceError::Frame(FrameError::Timeout {
            stage: ReadStage::Header,
            expected: 6,
            received: 0,
        });
        assert_eq!(device_error("query failed", err).code, TIMEOUT);
    }

    #[test]
    fn receipt_errors_are_invalid_data() {
        let err = DeviceError::MessageReceipt {
            sent: 0x0443,
            expected: 0x0444,
            received: 0x0080,
        };
        let cli = device_error("query failed", err);
        assert_eq!(cli.code, DATA_INVALID);
        assert!(cli.message.starts_with("query failed: "));
    }

    #[test]
    fn missing_device_is_a_transport_error() {
        let err = io::Error::from(io::ErrorKind::NotFound);
        assert_eq!(io_error("open failed", err).code, TRANSPORT_ERROR);
    }
}
