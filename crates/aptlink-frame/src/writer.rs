use std::io::{Read, Write};

use aptlink_codec::MessageRegistry;
use aptlink_transport::Transport;
use bytes::BytesMut;
use tracing::trace;

use crate::codec::{encode_frame, hex, Frame, HEADER_SIZE};
use crate::error::Result;

/// Encodes frames and sends them through a borrowed transport.
///
/// The encode buffer is kept between frames. Owners that outlive a single
/// writer can hand it back in with [`with_buffer`](Self::with_buffer) and take
/// it out again with [`into_buffer`](Self::into_buffer).
pub struct FrameWriter<'a, C> {
    transport: &'a mut Transport<C>,
    registry: &'a MessageRegistry,
    buf: BytesMut,
}

impl<'a, C: Read + Write> FrameWriter<'a, C> {
    pub fn new(transport: &'a mut Transport<C>, registry: &'a MessageRegistry) -> Self {
        Self::with_buffer(transport, registry, BytesMut::with_capacity(HEADER_SIZE))
    }

    pub fn with_buffer(
        transport: &'a mut Transport<C>,
        registry: &'a MessageRegistry,
        buf: BytesMut,
    ) -> Self {
        Self {
            transport,
            registry,
            buf,
        }
    }

    /// Give back the encode buffer, holding the last frame written.
    pub fn into_buffer(self) -> BytesMut {
        self.buf
    }

    /// Encode and send a complete frame.
    ///
    /// Nothing is written when encoding fails.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        self.buf.clear();
        encode_frame(frame, self.registry, &mut self.buf)?;
        trace!(bytes = %hex(&self.buf), "tx");
        self.transport.write(&self.buf)?;
        Ok(())
    }
}
