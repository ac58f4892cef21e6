use std::io::{Read, Write};
use std::time::Duration;

use aptlink_codec::{ids, MessageRegistry};
use aptlink_frame::{Frame, FrameError, FrameReader, FrameWriter};
use aptlink_transport::Transport;
use bytes::BytesMut;
use tracing::{debug, warn};

use crate::config::DeviceConfig;
use crate::error::{DeviceError, Result};
use crate::query::{PendingQuery, Query, QueryState};

/// A connection to one APT controller over an already configured channel.
///
/// All methods take `&mut self`, so one query is in flight at a time. Share
/// a device between threads behind a `Mutex`.
pub struct AptDevice<C> {
    transport: Transport<C>,
    registry: &'static MessageRegistry,
    config: DeviceConfig,
    tx_buf: BytesMut,
}

impl<C: Read + Write> AptDevice<C> {
    pub fn new(channel: C) -> Self {
        Self::with_config(channel, DeviceConfig::default())
    }

    pub fn with_config(channel: C, config: DeviceConfig) -> Self {
        Self {
            transport: Transport::with_config(channel, config.transport),
            registry: MessageRegistry::global(),
            config,
            tx_buf: BytesMut::new(),
        }
    }

    /// Build and send one frame.
    pub fn write_message(&mut self, frame: &Frame) -> Result<()> {
        let buf = std::mem::take(&mut self.tx_buf);
        let mut writer = FrameWriter::with_buffer(&mut self.transport, self.registry, buf);
        let written = writer.write_frame(frame);
        self.tx_buf = writer.into_buffer();
        Ok(written?)
    }

    /// Parse one frame, bounded by the default read timeout per stage.
    pub fn read_message(&mut self) -> Result<Frame> {
        Ok(FrameReader::new(&mut self.transport, self.registry).read_frame()?)
    }

    /// Parse one frame, bounded by `timeout` per stage.
    pub fn read_message_within(&mut self, timeout: Duration) -> Result<Frame> {
        Ok(FrameReader::new(&mut self.transport, self.registry).read_frame_within(timeout)?)
    }

    /// Send a request and return its response.
    ///
    /// Without a query timeout, exactly one read is attempted. With one,
    /// reads that time out are retried until the timeout has elapsed, after
    /// which the last timeout is returned. Any other error ends the query at
    /// once. A response with the wrong identifier fails the query; it is not
    /// skipped.
    pub fn query(&mut self, query: Query) -> Result<Frame> {
        let mut pending = PendingQuery::new(&query);

        if let Err(err) = self.write_message(&query.request) {
            pending.advance(QueryState::Failed);
            return Err(err);
        }
        pending.sent();

        let response = loop {
            pending.advance(QueryState::AwaitingResponse);
            match self.read_message() {
                Ok(frame) => break frame,
                Err(DeviceError::Frame(err @ FrameError::Timeout { .. })) => {
                    if pending.may_retry() {
                        debug!(error = %err, "query read timed out, retrying");
                        continue;
                    }
                    pending.advance(QueryState::Failed);
                    return Err(err.into());
                }
                Err(err) => {
                    pending.advance(QueryState::Failed);
                    return Err(err);
                }
            }
        };

        if response.id != pending.expected_id {
            warn!(
                sent = format_args!("{:#06x}", pending.request_id),
                expected = ids::name(pending.expected_id).unwrap_or("unknown"),
                received = ids::name(response.id).unwrap_or("unknown"),
                "unexpected response identifier"
            );
            pending.advance(QueryState::Failed);
            return Err(DeviceError::MessageReceipt {
                sent: pending.request_id,
                expected: pending.expected_id,
                received: response.id,
            });
        }

        pending.advance(QueryState::Done);
        Ok(response)
    }

    /// Drop whatever bytes the channel has buffered right now.
    pub fn discard_pending(&mut self) -> Result<usize> {
        Ok(self.transport.discard_pending()?)
    }

    pub fn registry(&self) -> &'static MessageRegistry {
        self.registry
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn transport(&self) -> &Transport<C> {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut Transport<C> {
        &mut self.transport
    }

    /// Release the channel.
    pub fn into_inner(self) -> C {
        self.transport.into_inner()
    }
}

impl<C> std::fmt::Debug for AptDevice<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AptDevice")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
