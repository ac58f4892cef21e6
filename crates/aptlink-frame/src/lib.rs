//! APT message framing.
//!
//! Every message starts with a 6-byte little-endian header:
//! - a 2-byte message identifier
//! - either two parameter bytes, or a 2-byte payload length
//! - a destination byte, with bit 7 set when a data packet follows
//! - a source byte
//!
//! Payloads are encoded and decoded through the message registry, so a
//! parsed [`Frame`] always carries typed values rather than raw bytes.

pub mod address;
pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{
    encode_frame, hex, Frame, FrameBody, Header, HeaderKind, ADDRESS_MASK, HEADER_SIZE,
    MAX_PAYLOAD, PAYLOAD_FLAG,
};
pub use error::{FrameError, ReadStage, Result};
pub use reader::FrameReader;
pub use writer::FrameWriter;
