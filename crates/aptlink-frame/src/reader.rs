use std::io::{Read, Write};
use std::time::Duration;

use aptlink_codec::MessageRegistry;
use aptlink_transport::Transport;
use tracing::trace;

use crate::codec::{hex, Frame, FrameBody, Header, HeaderKind, HEADER_SIZE};
use crate::error::{FrameError, ReadStage, Result};

/// Parses one frame at a time from a borrowed transport.
///
/// A short read at either stage is a timeout. Bytes already consumed are not
/// pushed back, so the stream is not resynchronized after a partial header.
pub struct FrameReader<'a, C> {
    transport: &'a mut Transport<C>,
    registry: &'a MessageRegistry,
}

impl<'a, C: Read + Write> FrameReader<'a, C> {
    pub fn new(transport: &'a mut Transport<C>, registry: &'a MessageRegistry) -> Self {
        Self {
            transport,
            registry,
        }
    }

    /// Read one frame, each stage bounded by the default read timeout.
    pub fn read_frame(&mut self) -> Result<Frame> {
        let timeout = self.transport.config().read_timeout;
        self.read_frame_within(timeout)
    }

    /// Read one frame, each stage bounded by `timeout`.
    pub fn read_frame_within(&mut self, timeout: Duration) -> Result<Frame> {
        let raw = self.transport.read(HEADER_SIZE, timeout)?;
        if raw.len() < HEADER_SIZE {
            return Err(FrameError::Timeout {
                stage: ReadStage::Header,
                expected: HEADER_SIZE,
                received: raw.len(),
            });
        }
        trace!(bytes = %hex(&raw), "rx header");

        let header = Header::parse([raw[0], raw[1], raw[2], raw[3], raw[4], raw[5]]);
        let body = match header.kind {
            HeaderKind::Params { param1, param2 } => FrameBody::Params { param1, param2 },
            HeaderKind::Payload { len } => {
                let len = usize::from(len);
                let payload = self.transport.read(len, timeout)?;
                if payload.len() < len {
                    return Err(FrameError::Timeout {
                        stage: ReadStage::Payload,
                        expected: len,
                        received: payload.len(),
                    });
                }
                trace!(bytes = %hex(&payload), "rx payload");
                FrameBody::Payload(self.registry.decode(header.id, &payload)?)
            }
        };

        Ok(Frame {
            id: header.id,
            dest: header.dest,
            source: header.source,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::os::unix::net::UnixStream;
    use std::time::Instant;

    use aptlink_codec::{ids::*, CodecError, Value};
    use aptlink_transport::TransportConfig;

    use super::*;
    use crate::address::{GENERIC_USB, HOST_CONTROLLER, RACK_CONTROLLER};

    fn transport(bytes: &[u8]) -> Transport<Cursor<Vec<u8>>> {
        Transport::with_config(
            Cursor::new(bytes.to_vec()),
            TransportConfig {
                read_timeout: Duration::from_millis(20),
                ..TransportConfig::default()
            },
        )
    }

    #[test]
    fn reads_header_only_frame() {
        let mut t = transport(&[0x61, 0x00, 0x03, 0x01, 0x01, 0x11]);
        let frame = FrameReader::new(&mut t, MessageRegistry::global())
            .read_frame()
            .unwrap();
        assert_eq!(frame.id, MGMSG_RACK_GET_BAYUSED);
        assert_eq!(frame.params(), Some((3, 1)));
        assert_eq!(frame.dest, HOST_CONTROLLER);
        assert_eq!(frame.source, RACK_CONTROLLER);
    }

    #[test]
    fn reads_payload_frame_and_masks_destination() {
        let mut t = transport(&[
            0x53, 0x04, 0x06, 0x00, 0xD0, 0x01, 0x01, 0x00, 0x10, 0x27, 0x00, 0x00,
        ]);
        let frame = FrameReader::new(&mut t, MessageRegistry::global())
            .read_frame()
            .unwrap();
        assert_eq!(frame.id, MGMSG_MOT_MOVE_ABSOLUTE);
        assert_eq!(frame.dest, GENERIC_USB);
        assert!(frame.has_payload());
        assert_eq!(
            frame.payload(),
            Some(&[Value::Int(1), Value::Int(10_000)][..])
        );
    }

    #[test]
    fn reads_consecutive_frames() {
        let mut t = transport(&[
            0x44, 0x04, 0x01, 0x00, 0x01, 0x50, 0x64, 0x04, 0x0E, 0x00, 0x81, 0x50, 0x01, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x00, 0x80,
        ]);
        let registry = MessageRegistry::global();
        let mut reader = FrameReader::new(&mut t, registry);
        assert_eq!(reader.read_frame().unwrap().id, MGMSG_MOT_MOVE_HOMED);
        let completed = reader.read_frame().unwrap();
        assert_eq!(completed.id, MGMSG_MOT_MOVE_COMPLETED);
        assert_eq!(completed.payload().map(|v| v.len()), Some(4));
        assert_eq!(completed.payload().unwrap()[3], Value::Int(0x8000_0400));
    }

    #[test]
    fn silent_channel_times_out_in_header_stage() {
        let mut t = transport(&[]);
        let start = Instant::now();
        let err = FrameReader::new(&mut t, MessageRegistry::global())
            .read_frame_within(Duration::from_millis(50))
            .unwrap_err();
        let elapsed = start.elapsed();
        assert!(matches!(
            err,
            FrameError::Timeout {
                stage: ReadStage::Header,
                expected: 6,
                received: 0
            }
        ));
        assert!(elapsed >= Duration::from_millis(50));
        assert!(elapsed < Duration::from_millis(250), "{elapsed:?}");
    }

    #[test]
    fn partial_header_is_a_timeout() {
        let mut t = transport(&[0x80, 0x00, 0x00]);
        let err = FrameReader::new(&mut t, MessageRegistry::global())
            .read_frame()
            .unwrap_err();
        assert!(matches!(
            err,
            FrameError::Timeout {
                stage: ReadStage::Header,
                received: 3,
                ..
            }
        ));
    }

    #[test]
    fn short_payload_is_a_timeout() {
        let mut t = transport(&[0x53, 0x04, 0x06, 0x00, 0xD0, 0x01, 0x01, 0x00]);
        let err = FrameReader::new(&mut t, MessageRegistry::global())
            .read_frame()
            .unwrap_err();
        assert!(err.is_timeout());
        assert!(matches!(
            err,
            FrameError::Timeout {
                stage: ReadStage::Payload,
                expected: 6,
                received: 2
            }
        ));
    }

    #[test]
    fn payload_length_mismatch_is_a_codec_error() {
        // Header claims 4 bytes; MOVE_ABSOLUTE needs 6.
        let mut t = transport(&[0x53, 0x04, 0x04, 0x00, 0xD0, 0x01, 0x01, 0x00, 0x00, 0x00]);
        let err = FrameReader::new(&mut t, MessageRegistry::global())
            .read_frame()
            .unwrap_err();
        assert!(matches!(
            err,
            FrameError::Codec(CodecError::Decoding {
                expected: 6,
                actual: 4,
                ..
            })
        ));
    }

    #[test]
    fn reads_from_nonblocking_socket() {
        let (mut near, far) = UnixStream::pair().unwrap();
        far.set_nonblocking(true).unwrap();
        let mut t = Transport::new(far);

        let writer = std::thread::spawn(move || {
            near.write_all(&[0x23, 0x02]).unwrap();
            std::thread::sleep(Duration::from_millis(10));
            near.write_all(&[0x00, 0x00, 0x50, 0x01]).unwrap();
            near
        });

        let frame = FrameReader::new(&mut t, MessageRegistry::global())
            .read_frame_within(Duration::from_millis(500))
            .unwrap();
        assert_eq!(frame.id, MGMSG_MOD_IDENTIFY);
        writer.join().unwrap();
    }
}
