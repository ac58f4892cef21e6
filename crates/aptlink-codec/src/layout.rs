use std::fmt;

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{CodecError, Result};
use crate::value::Value;

/// One field of a fixed payload layout. All numbers are little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    U16,
    I16,
    U32,
    I32,
    F32,
    /// Fixed-length byte string, NUL-padded on encode.
    Bytes(usize),
    /// Reserved bytes: zeros on encode, skipped on decode.
    Pad(usize),
}

impl FieldKind {
    /// Bytes this field occupies on the wire.
    pub const fn size(self) -> usize {
        match self {
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 | Self::F32 => 4,
            Self::Bytes(n) | Self::Pad(n) => n,
        }
    }

    /// Whether the field maps to a value (padding does not).
    pub const fn carries_value(self) -> bool {
        !matches!(self, Self::Pad(_))
    }

    fn int_range(self) -> Option<(i64, i64)> {
        match self {
            Self::U16 => Some((0, i64::from(u16::MAX))),
            Self::I16 => Some((i64::from(i16::MIN), i64::from(i16::MAX))),
            Self::U32 => Some((0, i64::from(u32::MAX))),
            Self::I32 => Some((i64::from(i32::MIN), i64::from(i32::MAX))),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U16 => f.write_str("u16"),
            Self::I16 => f.write_str("i16"),
            Self::U32 => f.write_str("u32"),
            Self::I32 => f.write_str("i32"),
            Self::F32 => f.write_str("f32"),
            Self::Bytes(n) => write!(f, "bytes[{n}]"),
            Self::Pad(n) => write!(f, "pad[{n}]"),
        }
    }
}

/// Payload layout of one message identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageDescriptor {
    pub id: u16,
    pub name: Option<&'static str>,
    pub fields: &'static [FieldKind],
}

impl MessageDescriptor {
    /// Exact payload length in bytes.
    pub fn encoded_len(&self) -> usize {
        self.fields.iter().map(|f| f.size()).sum()
    }

    /// Number of values the layout takes and yields.
    pub fn value_count(&self) -> usize {
        self.fields.iter().filter(|f| f.carries_value()).count()
    }

    /// Append the encoded payload to `dst`.
    pub fn encode_into(&self, values: &[Value], dst: &mut BytesMut) -> Result<()> {
        let expected = self.value_count();
        if values.len() != expected {
            return Err(self.encoding(format!(
                "expected {expected} values, got {}",
                values.len()
            )));
        }

        // Validate everything first so a failure leaves `dst` untouched.
        let mut values_iter = values.iter();
        let mut pairs = Vec::with_capacity(expected);
        let value_kinds = self.fields.iter().filter(|kind| kind.carries_value());
        for (index, kind) in value_kinds.enumerate() {
            let Some(value) = values_iter.next() else {
                break;
            };
            self.check(index, *kind, value)?;
            pairs.push(value);
        }

        dst.reserve(self.encoded_len());
        let mut pairs = pairs.into_iter();
        for kind in self.fields {
            if let FieldKind::Pad(n) = kind {
                dst.put_bytes(0, *n);
                continue;
            }
            let Some(value) = pairs.next() else {
                break;
            };
            match (kind, value) {
                (FieldKind::U16, Value::Int(v)) => dst.put_u16_le(*v as u16),
                (FieldKind::I16, Value::Int(v)) => dst.put_i16_le(*v as i16),
                (FieldKind::U32, Value::Int(v)) => dst.put_u32_le(*v as u32),
                (FieldKind::I32, Value::Int(v)) => dst.put_i32_le(*v as i32),
                (FieldKind::F32, Value::Float(v)) => dst.put_f32_le(*v),
                (FieldKind::Bytes(n), Value::Bytes(b)) => {
                    dst.put_slice(b);
                    dst.put_bytes(0, n - b.len());
                }
                // `check` already rejected every other pairing.
                _ => {}
            }
        }
        Ok(())
    }

    /// Decode a payload whose length must equal [`encoded_len`](Self::encoded_len).
    pub fn decode(&self, payload: &[u8]) -> Result<Vec<Value>> {
        let expected = self.encoded_len();
        if payload.len() != expected {
            return Err(CodecError::Decoding {
                id: self.id,
                expected,
                actual: payload.len(),
            });
        }

        let mut buf = payload;
        let mut values = Vec::with_capacity(self.value_count());
        for kind in self.fields {
            let value = match *kind {
                FieldKind::U16 => Value::Int(i64::from(buf.get_u16_le())),
                FieldKind::I16 => Value::Int(i64::from(buf.get_i16_le())),
                FieldKind::U32 => Value::Int(i64::from(buf.get_u32_le())),
                FieldKind::I32 => Value::Int(i64::from(buf.get_i32_le())),
                FieldKind::F32 => Value::Float(buf.get_f32_le()),
                FieldKind::Bytes(n) => {
                    let bytes = buf[..n].to_vec();
                    buf.advance(n);
                    Value::Bytes(bytes)
                }
                FieldKind::Pad(n) => {
                    buf.advance(n);
                    continue;
                }
            };
            values.push(value);
        }
        Ok(values)
    }

    fn check(&self, index: usize, kind: FieldKind, value: &Value) -> Result<()> {
        match (kind, value) {
            (FieldKind::F32, Value::Float(_)) => Ok(()),
            (FieldKind::Bytes(n), Value::Bytes(b)) => {
                if b.len() > n {
                    Err(self.encoding(format!(
                        "value {index} ({kind}) holds at most {n} bytes, got {}",
                        b.len()
                    )))
                } else {
                    Ok(())
                }
            }
            (_, Value::Int(v)) => match kind.int_range() {
                Some((min, max)) if (min..=max).contains(v) => Ok(()),
                Some(_) => Err(self.encoding(format!("value {index} ({kind}) out of range: {v}"))),
                None => Err(self.encoding(format!(
                    "value {index} ({kind}) expects {}, got integer",
                    expected_kind(kind)
                ))),
            },
            _ => Err(self.encoding(format!(
                "value {index} ({kind}) expects {}, got {}",
                expected_kind(kind),
                value.kind_name()
            ))),
        }
    }

    fn encoding(&self, reason: String) -> CodecError {
        CodecError::Encoding {
            id: self.id,
            reason,
        }
    }
}

fn expected_kind(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::F32 => "a float",
        FieldKind::Bytes(_) => "bytes",
        _ => "an integer",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: &[FieldKind] = &[
        FieldKind::I16,
        FieldKind::Pad(2),
        FieldKind::Bytes(4),
        FieldKind::F32,
    ];

    fn mixed() -> MessageDescriptor {
        MessageDescriptor {
            id: 0x7777,
            name: None,
            fields: MIXED,
        }
    }

    #[test]
    fn sizes_and_counts() {
        let desc = mixed();
        assert_eq!(desc.encoded_len(), 12);
        assert_eq!(desc.value_count(), 3);
    }

    #[test]
    fn encode_pads_and_zero_fills() {
        let desc = mixed();
        let mut buf = BytesMut::new();
        desc.encode_into(
            &[Value::Int(-2), Value::from("ab"), Value::Float(1.0)],
            &mut buf,
        )
        .unwrap();
        assert_eq!(
            &buf[..],
            &[0xFE, 0xFF, 0, 0, b'a', b'b', 0, 0, 0x00, 0x00, 0x80, 0x3F]
        );

        let decoded = desc.decode(&buf).unwrap();
        assert_eq!(
            decoded,
            vec![Value::Int(-2), Value::Bytes(b"ab\0\0".to_vec()), Value::Float(1.0)]
        );
    }

    #[test]
    fn rejects_overlong_bytes_and_wrong_kinds() {
        let desc = mixed();
        let mut buf = BytesMut::new();

        let err = desc
            .encode_into(&[Value::Int(0), Value::from("abcde"), Value::Float(0.0)], &mut buf)
            .unwrap_err();
        assert!(err.to_string().contains("at most 4 bytes"), "{err}");

        let err = desc
            .encode_into(&[Value::Int(0), Value::from("a"), Value::Int(1)], &mut buf)
            .unwrap_err();
        assert!(err.to_string().contains("expects a float"), "{err}");

        let err = desc
            .encode_into(&[Value::Float(0.0), Value::from("a"), Value::Float(1.0)], &mut buf)
            .unwrap_err();
        assert!(err.to_string().contains("expects an integer"), "{err}");

        assert!(buf.is_empty());
    }

    #[test]
    fn range_checks_follow_field_width() {
        let desc = mixed();
        let mut buf = BytesMut::new();
        let err = desc
            .encode_into(&[Value::Int(40_000), Value::from(""), Value::Float(0.0)], &mut buf)
            .unwrap_err();
        assert!(matches!(err, CodecError::Encoding { id: 0x7777, .. }));
        assert!(err.to_string().contains("out of range: 40000"), "{err}");
    }

    #[test]
    fn error_positions_skip_padding() {
        let desc = mixed();
        let mut buf = BytesMut::new();
        let err = desc
            .encode_into(&[Value::Int(0), Value::from("abcde"), Value::Float(0.0)], &mut buf)
            .unwrap_err();
        assert!(err.to_string().contains("value 1 (bytes[4])"), "{err}");

        let err = desc
            .encode_into(&[Value::Int(0), Value::from(""), Value::Int(3)], &mut buf)
            .unwrap_err();
        assert!(err.to_string().contains("value 2 (f32)"), "{err}");
    }
}
