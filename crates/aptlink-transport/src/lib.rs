//! Bounded-time byte transport for APT controller links.
//!
//! This is the lowest layer of aptlink. It wraps an already opened and
//! configured channel (USB-serial device, socket, test script) and provides
//! the two primitives the framing layer needs:
//! - `write`: send a whole buffer, looping over partial writes
//! - `read`: collect an exact number of bytes or give up at a deadline
//!
//! Finding and configuring the serial port is left to the caller;
//! [`LinkSettings::APT`] records the line parameters the controllers expect.

pub mod config;
pub mod error;
pub mod transport;

pub use config::{
    FlowControl, LinkSettings, Parity, TransportConfig, DEFAULT_POLL_INTERVAL,
    DEFAULT_READ_TIMEOUT, DEFAULT_WRITE_TIMEOUT, PURGE_DELAY,
};
pub use error::{Result, TransportError};
pub use transport::Transport;
