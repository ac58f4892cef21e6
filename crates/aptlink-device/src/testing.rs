//! Scripted in-memory controller for unit tests.

use std::collections::VecDeque;
use std::io::{self, ErrorKind, Read, Write};
use std::time::{Duration, Instant};

/// Answers each write with the next scripted reply.
///
/// Replies become readable `delay` after the write that triggers them. With
/// nothing readable the channel reports `WouldBlock`, like a non-blocking
/// serial port.
#[derive(Debug, Default)]
pub(crate) struct Scripted {
    replies: VecDeque<Vec<u8>>,
    rx: VecDeque<u8>,
    ready_at: Option<Instant>,
    delay: Duration,
    pub(crate) written: Vec<u8>,
}

impl Scripted {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(mut self, bytes: &[u8]) -> Self {
        self.replies.push_back(bytes.to_vec());
        self
    }

    pub(crate) fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Read for Scripted {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.ready_at.is_some_and(|at| Instant::now() < at) || self.rx.is_empty() {
            return Err(ErrorKind::WouldBlock.into());
        }
        let n = buf.len().min(self.rx.len());
        for (slot, byte) in buf.iter_mut().zip(self.rx.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}

impl Write for Scripted {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.extend_from_slice(buf);
        if let Some(reply) = self.replies.pop_front() {
            self.rx.extend(reply);
            self.ready_at = Some(Instant::now() + self.delay);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Test timing: 20 ms per read stage.
pub(crate) fn fast_config() -> crate::DeviceConfig {
    crate::DeviceConfig {
        transport: aptlink_transport::TransportConfig {
            read_timeout: Duration::from_millis(20),
            ..aptlink_transport::TransportConfig::default()
        },
        ..crate::DeviceConfig::default()
    }
}
