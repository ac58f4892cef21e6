//! Source and destination addresses, channel identifiers and status bytes.

/// The host PC.
pub const HOST_CONTROLLER: u8 = 0x01;
/// Motherboard of a rack (bay) system.
pub const RACK_CONTROLLER: u8 = 0x11;
pub const BAY_0: u8 = 0x21;
pub const BAY_1: u8 = 0x22;
pub const BAY_2: u8 = 0x23;
pub const BAY_3: u8 = 0x24;
pub const BAY_4: u8 = 0x25;
pub const BAY_5: u8 = 0x26;
pub const BAY_6: u8 = 0x27;
pub const BAY_7: u8 = 0x28;
pub const BAY_8: u8 = 0x29;
pub const BAY_9: u8 = 0x2A;
/// Single-controller USB unit.
pub const GENERIC_USB: u8 = 0x50;

pub const ALL_BAYS: [u8; 10] = [
    BAY_0, BAY_1, BAY_2, BAY_3, BAY_4, BAY_5, BAY_6, BAY_7, BAY_8, BAY_9,
];

pub const CHANNEL_1: u8 = 0x01;
pub const CHANNEL_2: u8 = 0x02;

pub const CHAN_ENABLE_STATE_ENABLED: u8 = 0x01;
pub const CHAN_ENABLE_STATE_DISABLED: u8 = 0x02;

pub const BAY_OCCUPIED: u8 = 0x01;
pub const BAY_EMPTY: u8 = 0x02;

/// Address of bay `index` (0-based), if the rack has such a bay.
pub fn bay(index: usize) -> Option<u8> {
    ALL_BAYS.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bays_are_contiguous() {
        assert_eq!(bay(0), Some(0x21));
        assert_eq!(bay(9), Some(0x2A));
        assert_eq!(bay(10), None);
        assert!(ALL_BAYS.windows(2).all(|w| w[1] == w[0] + 1));
    }
}
