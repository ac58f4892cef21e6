//! Request/response engine for APT controllers.
//!
//! [`AptDevice`] owns the channel to one controller and turns frames into
//! queries: send a request, wait a bounded time for the response, and check
//! that the response is the one that was asked for. Controller families
//! (motor, piezo, NanoTrak, ...) are built on top by delegation.

pub mod config;
pub mod control;
pub mod device;
pub mod error;
pub mod query;

#[cfg(test)]
mod testing;

pub use config::{DeviceConfig, INIT_QUERY_TIMEOUT, LONG_QUERY_TIMEOUT};
pub use control::{
    is_bay_type_serial, ChannelAddress, Controller, HardwareInfo, BAY_TYPE_SERIAL_PREFIXES,
};
pub use device::AptDevice;
pub use error::{DeviceError, Result};
pub use query::{Query, QueryState};
