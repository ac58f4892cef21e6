use std::time::Duration;

/// Errors that can occur on the byte channel beneath the APT framing.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// An I/O error occurred on the underlying channel.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The channel stopped accepting bytes before the buffer was sent.
    #[error("write timed out after {timeout:?} ({written} of {total} bytes sent)")]
    WriteTimeout {
        written: usize,
        total: usize,
        timeout: Duration,
    },

    /// The channel reported a zero-length write.
    #[error("channel closed while writing")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, TransportError>;
