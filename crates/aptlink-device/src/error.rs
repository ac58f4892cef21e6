use aptlink_frame::FrameError;
use aptlink_transport::TransportError;

/// Errors that can occur while talking to a device.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// Frame-level error, including read timeouts and payload codec
    /// failures.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// Transport-level error outside frame handling.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The response identifier differs from the expected one.
    #[error(
        "error querying apt device when sending message {sent:#06x}: \
         expected to receive message {expected:#06x} but got {received:#06x}"
    )]
    MessageReceipt {
        sent: u16,
        expected: u16,
        received: u16,
    },

    /// A status byte is outside its enumeration.
    #[error("invalid status {value:#04x} in response {id:#06x}")]
    InvalidStatus { id: u16, value: u8 },

    /// The response has parameters where a data packet was expected, or
    /// the other way around.
    #[error("response {id:#06x} has an unexpected body")]
    UnexpectedBody { id: u16 },
}

impl DeviceError {
    /// Whether the error is a read timeout at either frame stage.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Frame(err) if err.is_timeout())
    }
}

pub type Result<T> = std::result::Result<T, DeviceError>;
