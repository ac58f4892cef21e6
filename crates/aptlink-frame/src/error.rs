use std::fmt;

use aptlink_codec::CodecError;
use aptlink_transport::TransportError;

/// Which part of a frame was being read when time ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStage {
    Header,
    Payload,
}

impl fmt::Display for ReadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => f.write_str("header"),
            Self::Payload => f.write_str("payload"),
        }
    }
}

/// Errors that can occur while building or parsing frames.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The byte channel failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The payload could not be encoded or decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Fewer bytes than required arrived before the deadline.
    #[error("timed out reading frame {stage} ({received} of {expected} bytes)")]
    Timeout {
        stage: ReadStage,
        expected: usize,
        received: usize,
    },

    /// Destination address collides with the payload flag bit.
    #[error("invalid destination address {0:#04x} (bit 7 is reserved)")]
    InvalidAddress(u8),

    /// Encoded payload does not fit the 16-bit length field.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },
}

impl FrameError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
