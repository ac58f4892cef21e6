use std::time::Duration;

/// Default bound for a single read (header or payload stage).
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(500);

/// Default bound for sending one buffer.
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_millis(5000);

/// Sleep between channel reads while waiting for more bytes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Settle time the controllers need after a purge or reset.
pub const PURGE_DELAY: Duration = Duration::from_millis(50);

/// Timing behavior of a [`Transport`](crate::Transport).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    /// Read bound used when the caller does not supply one.
    pub read_timeout: Duration,
    /// Upper bound for one `write` call.
    pub write_timeout: Duration,
    /// Sleep between channel reads. Bounds timeout granularity.
    pub poll_interval: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            read_timeout: DEFAULT_READ_TIMEOUT,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Parity setting of the serial link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Odd,
    Even,
}

/// Flow-control setting of the serial link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowControl {
    None,
    RtsCts,
    XonXoff,
}

/// Serial line parameters expected by APT controllers.
///
/// The transport never applies these itself. Whoever opens the channel is
/// responsible for configuring the port before handing it over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSettings {
    pub baud_rate: u32,
    pub data_bits: u8,
    pub stop_bits: u8,
    pub parity: Parity,
    pub flow_control: FlowControl,
}

impl LinkSettings {
    /// 115200 baud, 8N1, hardware RTS/CTS handshake.
    pub const APT: LinkSettings = LinkSettings {
        baud_rate: 115_200,
        data_bits: 8,
        stop_bits: 1,
        parity: Parity::None,
        flow_control: FlowControl::RtsCts,
    };
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self::APT
    }
}
