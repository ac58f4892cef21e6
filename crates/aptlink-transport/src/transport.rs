use std::io::{ErrorKind, Read, Write};
use std::thread;
use std::time::{Duration, Instant};

use bytes::{Bytes, BytesMut};
use tracing::{debug, trace};

use crate::config::TransportConfig;
use crate::error::{Result, TransportError};

const READ_CHUNK_SIZE: usize = 256;

/// Bounded-time reader/writer over an already configured byte channel.
///
/// The channel is anything implementing `Read + Write`: an opened serial
/// device, a socket, or an in-memory script in tests. A read that returns
/// `Ok(0)`, `WouldBlock` or `TimedOut` is treated as "no data yet", so both
/// blocking-with-timeout and non-blocking channels work.
pub struct Transport<C> {
    inner: C,
    config: TransportConfig,
}

impl<C: Read + Write> Transport<C> {
    /// Wrap a channel with default timing.
    pub fn new(inner: C) -> Self {
        Self::with_config(inner, TransportConfig::default())
    }

    /// Wrap a channel with explicit timing.
    pub fn with_config(inner: C, config: TransportConfig) -> Self {
        Self { inner, config }
    }

    /// Send the whole buffer, looping over partial writes.
    pub fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let start = Instant::now();
        let mut offset = 0usize;
        while offset < bytes.len() {
            match self.inner.write(&bytes[offset..]) {
                Ok(0) => return Err(TransportError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if is_not_ready(&err) => {
                    if start.elapsed() > self.config.write_timeout {
                        return Err(TransportError::WriteTimeout {
                            written: offset,
                            total: bytes.len(),
                            timeout: self.config.write_timeout,
                        });
                    }
                    thread::sleep(self.config.poll_interval);
                }
                Err(err) => return Err(TransportError::Io(err)),
            }
        }

        self.flush(start, bytes.len())?;
        trace!(len = bytes.len(), "wrote bytes");
        Ok(())
    }

    fn flush(&mut self, start: Instant, total: usize) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if is_not_ready(&err) => {
                    if start.elapsed() > self.config.write_timeout {
                        return Err(TransportError::WriteTimeout {
                            written: total,
                            total,
                            timeout: self.config.write_timeout,
                        });
                    }
                    thread::sleep(self.config.poll_interval);
                }
                Err(err) => return Err(TransportError::Io(err)),
            }
        }
    }

    /// Collect up to `len` bytes, giving up once `timeout` has elapsed.
    ///
    /// The result may be shorter than `len` (including empty). Callers must
    /// treat a short result as a timeout, never as data. Granularity is
    /// bounded by the poll interval, so the call may overshoot `timeout` by
    /// roughly one interval plus one channel read.
    pub fn read(&mut self, len: usize, timeout: Duration) -> Result<Bytes> {
        let start = Instant::now();
        let mut buf = BytesMut::with_capacity(len);
        let mut chunk = [0u8; READ_CHUNK_SIZE];

        while buf.len() < len {
            let want = (len - buf.len()).min(READ_CHUNK_SIZE);
            match self.inner.read(&mut chunk[..want]) {
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if is_not_ready(&err) => {}
                Err(err) => return Err(TransportError::Io(err)),
            }

            if buf.len() >= len {
                break;
            }
            if start.elapsed() > timeout {
                debug!(
                    wanted = len,
                    received = buf.len(),
                    ?timeout,
                    "read deadline exceeded"
                );
                break;
            }
            thread::sleep(self.config.poll_interval);
        }

        Ok(buf.freeze())
    }

    /// [`read`](Self::read) bounded by the configured default read timeout.
    pub fn read_default(&mut self, len: usize) -> Result<Bytes> {
        self.read(len, self.config.read_timeout)
    }

    /// Read and drop whatever the channel has pending right now.
    ///
    /// Returns the number of bytes discarded. Useful after a timed-out query
    /// left a partial frame in the stream.
    pub fn discard_pending(&mut self) -> Result<usize> {
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        let mut dropped = 0usize;
        loop {
            match self.inner.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => dropped += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if is_not_ready(&err) => break,
                Err(err) => return Err(TransportError::Io(err)),
            }
        }
        if dropped > 0 {
            debug!(dropped, "discarded pending input");
        }
        Ok(dropped)
    }

    /// Borrow the underlying channel.
    pub fn get_ref(&self) -> &C {
        &self.inner
    }

    /// Mutably borrow the underlying channel.
    pub fn get_mut(&mut self) -> &mut C {
        &mut self.inner
    }

    /// Consume the transport and return the channel.
    pub fn into_inner(self) -> C {
        self.inner
    }

    /// Current timing configuration.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Replace the timing configuration.
    pub fn set_config(&mut self, config: TransportConfig) {
        self.config = config;
    }
}

impl<C> std::fmt::Debug for Transport<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn is_not_ready(err: &std::io::Error) -> bool {
    matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut)
}
