use std::time::Duration;

use aptlink_transport::TransportConfig;

/// Bound for queries issued while a controller is still starting up.
pub const INIT_QUERY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Bound for queries that wait on slow operations such as homing.
pub const LONG_QUERY_TIMEOUT: Duration = Duration::from_millis(60_000);

/// Configuration for an [`AptDevice`](crate::AptDevice).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Timing of the underlying transport.
    pub transport: TransportConfig,
    /// Query bound used for hardware info during discovery.
    pub init_query_timeout: Duration,
    /// Query bound offered to command layers for long-running moves.
    pub long_query_timeout: Duration,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            transport: TransportConfig::default(),
            init_query_timeout: INIT_QUERY_TIMEOUT,
            long_query_timeout: LONG_QUERY_TIMEOUT,
        }
    }
}
