use std::collections::HashMap;

use bytes::{Bytes, BytesMut};
use once_cell::sync::Lazy;

use crate::catalog::{LAYOUTS, VARIABLE_LENGTH};
use crate::error::{CodecError, Result, UnsupportedReason};
use crate::ids;
use crate::layout::MessageDescriptor;
use crate::value::Value;

static GLOBAL: Lazy<MessageRegistry> = Lazy::new(MessageRegistry::build);

/// Identifier-keyed table of payload layouts.
///
/// The table is frozen at first use and shared for the life of the process.
#[derive(Debug)]
pub struct MessageRegistry {
    descriptors: HashMap<u16, MessageDescriptor>,
}

impl MessageRegistry {
    /// The process-wide registry.
    pub fn global() -> &'static MessageRegistry {
        &GLOBAL
    }

    fn build() -> Self {
        let mut descriptors = HashMap::new();
        for (group, fields) in LAYOUTS {
            for &id in *group {
                descriptors.entry(id).or_insert(MessageDescriptor {
                    id,
                    name: ids::name(id),
                    fields: *fields,
                });
            }
        }
        Self { descriptors }
    }

    /// Layout for `id`, or `None` when the message has no payload layout.
    pub fn descriptor(&self, id: u16) -> Option<&MessageDescriptor> {
        self.descriptors.get(&id)
    }

    /// Layout for `id`, failing with the reason it is unsupported.
    pub fn lookup(&self, id: u16) -> Result<&MessageDescriptor> {
        if is_variable_length(id) {
            return Err(CodecError::UnsupportedMessage {
                id,
                reason: UnsupportedReason::NestedSubmessages,
            });
        }
        self.descriptors
            .get(&id)
            .ok_or(CodecError::UnsupportedMessage {
                id,
                reason: UnsupportedReason::NoLayout,
            })
    }

    /// Encode `values` into a fresh payload buffer.
    pub fn encode(&self, id: u16, values: &[Value]) -> Result<Bytes> {
        let mut buf = BytesMut::new();
        self.encode_into(id, values, &mut buf)?;
        Ok(buf.freeze())
    }

    /// Append the encoded payload to `dst`, returning the bytes written.
    pub fn encode_into(&self, id: u16, values: &[Value], dst: &mut BytesMut) -> Result<usize> {
        let descriptor = self.lookup(id)?;
        descriptor.encode_into(values, dst)?;
        Ok(descriptor.encoded_len())
    }

    /// Decode a payload into its ordered values.
    pub fn decode(&self, id: u16, payload: &[u8]) -> Result<Vec<Value>> {
        self.lookup(id)?.decode(payload)
    }

    /// Identifiers with a registered layout, ascending.
    pub fn ids(&self) -> Vec<u16> {
        let mut ids: Vec<u16> = self.descriptors.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Whether `id` nests submessages and is rejected by the codec.
pub fn is_variable_length(id: u16) -> bool {
    VARIABLE_LENGTH.contains(&id)
}
