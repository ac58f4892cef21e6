use std::fmt;

/// Why an identifier cannot be encoded or decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedReason {
    /// No payload layout is registered for the identifier.
    NoLayout,
    /// The payload embeds submessages whose shape depends on content.
    NestedSubmessages,
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLayout => f.write_str("has no registered payload layout"),
            Self::NestedSubmessages => f.write_str(
                "has a variable data packet structure due to nested submessages, \
                 which is not supported",
            ),
        }
    }
}

/// Errors that can occur while encoding or decoding a payload.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The identifier has no usable layout.
    #[error("message {id:#06x} {reason}")]
    UnsupportedMessage { id: u16, reason: UnsupportedReason },

    /// Values do not fit the layout (count, kind or range).
    #[error("cannot encode message {id:#06x}: {reason}")]
    Encoding { id: u16, reason: String },

    /// Payload length does not match the layout.
    #[error("cannot decode message {id:#06x}: expected {expected} payload bytes, got {actual}")]
    Decoding {
        id: u16,
        expected: usize,
        actual: usize,
    },
}

impl CodecError {
    /// Identifier the error refers to.
    pub fn id(&self) -> u16 {
        match self {
            Self::UnsupportedMessage { id, .. }
            | Self::Encoding { id, .. }
            | Self::Decoding { id, .. } => *id,
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
