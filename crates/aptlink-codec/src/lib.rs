//! APT message identifiers and payload codec.
//!
//! Every message with a data packet has a fixed little-endian layout. The
//! [`MessageRegistry`] maps identifiers to those layouts and converts
//! between payload bytes and ordered [`Value`] lists. The laser and quad
//! parameter messages nest submessages and are rejected.

mod catalog;
pub mod error;
pub mod ids;
pub mod layout;
pub mod registry;
pub mod value;

pub use error::{CodecError, Result, UnsupportedReason};
pub use layout::{FieldKind, MessageDescriptor};
pub use registry::{is_variable_length, MessageRegistry};
pub use value::Value;
