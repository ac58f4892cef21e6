use aptlink_codec::{MessageRegistry, Value};
use bytes::{BufMut, BytesMut};

use crate::address::{GENERIC_USB, HOST_CONTROLLER};
use crate::error::{FrameError, Result};

/// Every frame starts with a 6-byte header.
pub const HEADER_SIZE: usize = 6;

/// Set on the destination byte when a data packet follows the header.
pub const PAYLOAD_FLAG: u8 = 0x80;

/// Mask recovering the destination address from a payload header.
pub const ADDRESS_MASK: u8 = 0x7F;

/// Largest payload the 16-bit length field can describe.
pub const MAX_PAYLOAD: usize = u16::MAX as usize;

/// What follows the identifier in a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameBody {
    /// Header-only message carrying two parameter bytes.
    Params { param1: u8, param2: u8 },
    /// Message with a data packet, as decoded values.
    Payload(Vec<Value>),
}

/// One APT message.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub id: u16,
    pub dest: u8,
    pub source: u8,
    pub body: FrameBody,
}

impl Frame {
    /// Header-only frame from the host to a generic USB unit, params zero.
    pub fn new(id: u16) -> Self {
        Self {
            id,
            dest: GENERIC_USB,
            source: HOST_CONTROLLER,
            body: FrameBody::Params {
                param1: 0,
                param2: 0,
            },
        }
    }

    pub fn with_params(mut self, param1: u8, param2: u8) -> Self {
        self.body = FrameBody::Params { param1, param2 };
        self
    }

    /// Replace the body with a data packet.
    pub fn with_payload(mut self, values: Vec<Value>) -> Self {
        self.body = FrameBody::Payload(values);
        self
    }

    pub fn with_dest(mut self, dest: u8) -> Self {
        self.dest = dest;
        self
    }

    pub fn with_source(mut self, source: u8) -> Self {
        self.source = source;
        self
    }

    pub fn has_payload(&self) -> bool {
        matches!(self.body, FrameBody::Payload(_))
    }

    /// Parameter bytes of a header-only frame.
    pub fn params(&self) -> Option<(u8, u8)> {
        match self.body {
            FrameBody::Params { param1, param2 } => Some((param1, param2)),
            FrameBody::Payload(_) => None,
        }
    }

    /// Decoded values of a frame with a data packet.
    pub fn payload(&self) -> Option<&[Value]> {
        match &self.body {
            FrameBody::Payload(values) => Some(values),
            FrameBody::Params { .. } => None,
        }
    }
}

/// Decoded 6-byte header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub dest: u8,
    pub source: u8,
    pub kind: HeaderKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    Params { param1: u8, param2: u8 },
    /// A data packet of `len` bytes follows.
    Payload { len: u16 },
}

impl Header {
    /// Unpack a header. The destination is masked when the payload flag is set.
    pub fn parse(raw: [u8; HEADER_SIZE]) -> Self {
        let id = u16::from_le_bytes([raw[0], raw[1]]);
        let source = raw[5];
        if raw[4] & PAYLOAD_FLAG != 0 {
            Self {
                id,
                dest: raw[4] & ADDRESS_MASK,
                source,
                kind: HeaderKind::Payload {
                    len: u16::from_le_bytes([raw[2], raw[3]]),
                },
            }
        } else {
            Self {
                id,
                dest: raw[4],
                source,
                kind: HeaderKind::Params {
                    param1: raw[2],
                    param2: raw[3],
                },
            }
        }
    }
}

/// Encode a frame into the wire format.
///
/// ```text
/// header only:  id (2B LE) | param1 | param2 | dest        | source
/// with payload: id (2B LE) | len (2B LE)     | dest | 0x80 | source | payload
/// ```
pub fn encode_frame(frame: &Frame, registry: &MessageRegistry, dst: &mut BytesMut) -> Result<()> {
    if frame.dest & PAYLOAD_FLAG != 0 {
        return Err(FrameError::InvalidAddress(frame.dest));
    }

    match &frame.body {
        FrameBody::Params { param1, param2 } => {
            dst.reserve(HEADER_SIZE);
            dst.put_u16_le(frame.id);
            dst.put_u8(*param1);
            dst.put_u8(*param2);
            dst.put_u8(frame.dest);
            dst.put_u8(frame.source);
        }
        FrameBody::Payload(values) => {
            let payload = registry.encode(frame.id, values)?;
            if payload.len() > MAX_PAYLOAD {
                return Err(FrameError::PayloadTooLarge {
                    size: payload.len(),
                    max: MAX_PAYLOAD,
                });
            }
            dst.reserve(HEADER_SIZE + payload.len());
            dst.put_u16_le(frame.id);
            dst.put_u16_le(payload.len() as u16);
            dst.put_u8(frame.dest | PAYLOAD_FLAG);
            dst.put_u8(frame.source);
            dst.put_slice(&payload);
        }
    }
    Ok(())
}

/// Lowercase space-separated hex, for trace output.
pub fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format!("{b:02x}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use aptlink_codec::ids::*;

    use super::*;

    fn encode(frame: &Frame) -> Result<BytesMut> {
        let mut buf = BytesMut::new();
        encode_frame(frame, MessageRegistry::global(), &mut buf)?;
        Ok(buf)
    }

    #[test]
    fn header_only_layout() {
        let frame = Frame::new(MGMSG_MOT_GET_MOVERELPARAMS).with_params(1, 0);
        let wire = encode(&frame).unwrap();
        assert_eq!(&wire[..], &[0x47, 0x04, 0x01, 0x00, 0x50, 0x01]);
    }

    #[test]
    fn payload_frame_sets_flag() {
        let frame = Frame::new(MGMSG_MOT_MOVE_ABSOLUTE)
            .with_payload(vec![Value::Int(1), Value::Int(-200)]);
        let wire = encode(&frame).unwrap();
        assert_eq!(
            &wire[..],
            &[0x53, 0x04, 0x06, 0x00, 0xD0, 0x01, 0x01, 0x00, 0x38, 0xFF, 0xFF, 0xFF]
        );

        let header = Header::parse([wire[0], wire[1], wire[2], wire[3], wire[4], wire[5]]);
        assert_eq!(header.dest, GENERIC_USB);
        assert_eq!(header.kind, HeaderKind::Payload { len: 6 });
    }

    #[test]
    fn jog_params_match_captured_frame() {
        let frame = Frame::new(MGMSG_MOT_SET_JOGPARAMS).with_payload(
            [1, 2, 0x257E, 0x08BD, 0xDC, 0x09_D425, 2]
                .into_iter()
                .map(Value::Int)
                .collect(),
        );
        let wire = encode(&frame).unwrap();
        assert_eq!(
            &wire[..],
            &[
                0x16, 0x04, 0x16, 0x00, 0xD0, 0x01, 0x01, 0x00, 0x02, 0x00, 0x7E, 0x25, 0x00, 0x00,
                0xBD, 0x08, 0x00, 0x00, 0xDC, 0x00, 0x00, 0x00, 0x25, 0xD4, 0x09, 0x00, 0x02, 0x00,
            ]
        );
    }

    #[test]
    fn reserved_destination_bit_is_rejected() {
        let frame = Frame::new(MGMSG_MOD_IDENTIFY).with_dest(0xD0);
        assert!(matches!(
            encode(&frame),
            Err(FrameError::InvalidAddress(0xD0))
        ));
    }

    #[test]
    fn unsupported_payload_is_a_codec_error() {
        let frame = Frame::new(MGMSG_LA_SET_PARAMS).with_payload(vec![Value::Int(1)]);
        assert!(matches!(encode(&frame), Err(FrameError::Codec(_))));
    }

    #[test]
    fn header_params_unpack() {
        let header = Header::parse([0x12, 0x02, 0x01, 0x02, 0x21, 0x11]);
        assert_eq!(header.id, MGMSG_MOD_GET_CHANENABLESTATE);
        assert_eq!(header.dest, 0x21);
        assert_eq!(header.source, 0x11);
        assert_eq!(
            header.kind,
            HeaderKind::Params {
                param1: 1,
                param2: 2
            }
        );
    }

    #[test]
    fn hex_dump() {
        assert_eq!(hex(&[0x47, 0x04, 0xD0]), "47 04 d0");
        assert_eq!(hex(&[]), "");
    }
}
