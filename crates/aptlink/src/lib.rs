//! APT controller protocol core.
//!
//! aptlink speaks the binary APT protocol used by motion-control, piezo,
//! NanoTrak, laser and quad-detector controllers over a USB-serial link.
//!
//! # Crate Structure
//!
//! - [`transport`]: bounded-time reads and writes over any `Read + Write` channel
//! - [`codec`]: message identifiers and fixed payload layouts
//! - [`frame`]: 6-byte header framing with typed payloads
//! - [`device`]: request/response queries and module control (behind `device` feature)

/// Re-export transport types.
pub mod transport {
    pub use aptlink_transport::*;
}

/// Re-export codec types.
pub mod codec {
    pub use aptlink_codec::*;
}

/// Re-export frame types.
pub mod frame {
    pub use aptlink_frame::*;
}

/// Re-export device types (requires `device` feature).
#[cfg(feature = "device")]
pub mod device {
    pub use aptlink_device::*;
}
