//! Generic module and rack control shared by every controller family.

use std::io::{Read, Write};
use std::time::Duration;

use aptlink_codec::ids::*;
use aptlink_codec::Value;
use aptlink_frame::address::{
    bay, BAY_EMPTY, BAY_OCCUPIED, CHANNEL_1, CHANNEL_2, CHAN_ENABLE_STATE_DISABLED,
    CHAN_ENABLE_STATE_ENABLED, GENERIC_USB, RACK_CONTROLLER,
};
use aptlink_frame::Frame;
use serde::Serialize;
use tracing::{debug, info};

use crate::device::AptDevice;
use crate::error::{DeviceError, Result};
use crate::query::Query;

/// Serial-number prefixes of rack controllers whose channels live in bays.
pub const BAY_TYPE_SERIAL_PREFIXES: [&str; 4] = ["70", "71", "73", "94"];

/// Whether a controller with this serial number addresses channels by bay.
pub fn is_bay_type_serial(serial: &str) -> bool {
    BAY_TYPE_SERIAL_PREFIXES
        .iter()
        .any(|prefix| serial.starts_with(prefix))
}

/// Identity reported by `HW_GET_INFO`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HardwareInfo {
    pub serial_number: i32,
    pub model: String,
    pub hardware_type: u16,
    pub firmware_version: u32,
    pub notes: String,
    pub hardware_version: u16,
    pub mod_state: u16,
    pub num_channels: u16,
}

impl HardwareInfo {
    fn from_values(id: u16, values: &[Value]) -> Result<Self> {
        let bad = || DeviceError::UnexpectedBody { id };
        let int = |index: usize| values.get(index).and_then(Value::as_i64).ok_or_else(bad);
        let text = |index: usize| values.get(index).and_then(Value::as_text).ok_or_else(bad);

        Ok(Self {
            serial_number: int(0)? as i32,
            model: text(1)?,
            hardware_type: int(2)? as u16,
            firmware_version: int(3)? as u32,
            notes: text(4)?,
            hardware_version: int(5)? as u16,
            mod_state: int(6)? as u16,
            num_channels: int(7)? as u16,
        })
    }

    /// Firmware version as `major.interim.minor`.
    pub fn firmware_string(&self) -> String {
        let [minor, interim, major, _] = self.firmware_version.to_le_bytes();
        format!("{major}.{interim}.{minor}")
    }
}

/// A drive channel and the address that serves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChannelAddress {
    pub channel: u8,
    pub dest: u8,
}

/// An initialized controller: its identity and enabled channels.
///
/// For rack systems `info` describes the rack controller itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Controller {
    pub info: HardwareInfo,
    pub channels: Vec<ChannelAddress>,
}

impl Controller {
    /// Model name of the controller, e.g. `BSC201`.
    pub fn model(&self) -> &str {
        &self.info.model
    }
}

impl<C: Read + Write> AptDevice<C> {
    /// Flash the front-panel LED of the addressed module.
    pub fn identify(&mut self, dest: u8) -> Result<()> {
        self.write_message(&Frame::new(MGMSG_MOD_IDENTIFY).with_dest(dest))
    }

    pub fn set_channel_enabled(&mut self, channel: u8, enabled: bool, dest: u8) -> Result<()> {
        let state = if enabled {
            CHAN_ENABLE_STATE_ENABLED
        } else {
            CHAN_ENABLE_STATE_DISABLED
        };
        self.write_message(
            &Frame::new(MGMSG_MOD_SET_CHANENABLESTATE)
                .with_params(channel, state)
                .with_dest(dest),
        )
    }

    pub fn channel_enabled(&mut self, channel: u8, dest: u8) -> Result<bool> {
        let response = self.query(Query::new(
            Frame::new(MGMSG_MOD_REQ_CHANENABLESTATE)
                .with_params(channel, 0)
                .with_dest(dest),
            MGMSG_MOD_GET_CHANENABLESTATE,
        ))?;
        let (_, state) = response
            .params()
            .ok_or(DeviceError::UnexpectedBody { id: response.id })?;
        match state {
            CHAN_ENABLE_STATE_ENABLED => Ok(true),
            CHAN_ENABLE_STATE_DISABLED => Ok(false),
            value => Err(DeviceError::InvalidStatus {
                id: response.id,
                value,
            }),
        }
    }

    /// Stop the controller from waiting for a firmware upload.
    pub fn disable_flash_programming(&mut self, dest: u8) -> Result<()> {
        self.write_message(&Frame::new(MGMSG_HW_NO_FLASH_PROGRAMMING).with_dest(dest))
    }

    pub fn start_update_messages(&mut self, dest: u8) -> Result<()> {
        self.write_message(&Frame::new(MGMSG_HW_START_UPDATEMSGS).with_dest(dest))
    }

    pub fn stop_update_messages(&mut self, dest: u8) -> Result<()> {
        self.write_message(&Frame::new(MGMSG_HW_STOP_UPDATEMSGS).with_dest(dest))
    }

    pub fn hardware_info(&mut self, dest: u8, timeout: Option<Duration>) -> Result<HardwareInfo> {
        let request = Frame::new(MGMSG_HW_REQ_INFO).with_dest(dest);
        let mut query = Query::new(request, MGMSG_HW_GET_INFO);
        query.timeout = timeout;
        let response = self.query(query)?;
        let values = response
            .payload()
            .ok_or(DeviceError::UnexpectedBody { id: response.id })?;
        HardwareInfo::from_values(response.id, values)
    }

    /// Whether rack bay `bay_index` (0-based) holds a module.
    pub fn bay_used(&mut self, bay_index: u8) -> Result<bool> {
        let response = self.query(Query::new(
            Frame::new(MGMSG_RACK_REQ_BAYUSED)
                .with_params(bay_index, 0)
                .with_dest(RACK_CONTROLLER),
            MGMSG_RACK_GET_BAYUSED,
        ))?;
        let (_, state) = response
            .params()
            .ok_or(DeviceError::UnexpectedBody { id: response.id })?;
        match state {
            BAY_OCCUPIED => Ok(true),
            BAY_EMPTY => Ok(false),
            value => Err(DeviceError::InvalidStatus {
                id: response.id,
                value,
            }),
        }
    }

    /// Work out which addresses serve the controller's drive channels.
    ///
    /// Rack controllers report one channel per occupied bay. Other units
    /// serve their channels from the generic USB address. Flash programming
    /// is disabled on every module that is visited.
    pub fn discover_channels(&mut self, serial: &str) -> Result<Vec<ChannelAddress>> {
        self.discover(serial).map(|(_, channels)| channels)
    }

    /// Enable every listed channel.
    ///
    /// Each channel is preceded by an enable of channel 1 on the rack
    /// controller, which single units ignore.
    pub fn enable_channels(&mut self, channels: &[ChannelAddress]) -> Result<()> {
        for address in channels {
            self.set_channel_enabled(CHANNEL_1, true, RACK_CONTROLLER)?;
            self.set_channel_enabled(address.channel, true, address.dest)?;
        }
        Ok(())
    }

    /// Bring a freshly opened controller into a usable state: discover its
    /// channels, enable them, and report what was found.
    pub fn initialize(&mut self, serial: &str) -> Result<Controller> {
        let (info, channels) = self.discover(serial)?;
        self.enable_channels(&channels)?;
        info!(
            model = %info.model,
            serial = info.serial_number,
            notes = %info.notes,
            channels = channels.len(),
            "connected"
        );
        Ok(Controller { info, channels })
    }

    fn discover(&mut self, serial: &str) -> Result<(HardwareInfo, Vec<ChannelAddress>)> {
        let mut channels = Vec::new();

        if is_bay_type_serial(serial) {
            let rack = self.hardware_info(RACK_CONTROLLER, None)?;
            debug!(bays = rack.num_channels, model = %rack.model, "rack controller");
            for index in 0..rack.num_channels {
                let Some(dest) = bay(usize::from(index)) else {
                    break;
                };
                self.disable_flash_programming(dest)?;
                if self.bay_used(index as u8)? {
                    let module = self.hardware_info(dest, None)?;
                    debug!(bay = index, model = %module.model, "occupied bay");
                    channels.push(ChannelAddress {
                        channel: CHANNEL_1,
                        dest,
                    });
                }
            }
            Ok((rack, channels))
        } else {
            self.disable_flash_programming(GENERIC_USB)?;
            let timeout = self.config().init_query_timeout;
            let unit = self.hardware_info(GENERIC_USB, Some(timeout))?;
            debug!(model = %unit.model, channels = unit.num_channels, "single unit");
            channels.extend(
                [CHANNEL_1, CHANNEL_2]
                    .into_iter()
                    .take(usize::from(unit.num_channels))
                    .map(|channel| ChannelAddress {
                        channel,
                        dest: GENERIC_USB,
                    }),
            );
            Ok((unit, channels))
        }
    }
}

#[cfg(test)]
mod tests {
    use aptlink_codec::MessageRegistry;
    use aptlink_frame::address::BAY_1;
    use bytes::BytesMut;

    use super::*;
    use crate::testing::{fast_config, Scripted};

    fn device(channel: Scripted) -> AptDevice<Scripted> {
        AptDevice::with_config(channel, fast_config())
    }

    fn info_reply(serial: i32, model: &str, channels: u16, source: u8) -> Vec<u8> {
        let frame = Frame::new(MGMSG_HW_GET_INFO)
            .with_dest(0x01)
            .with_source(source)
            .with_payload(vec![
                Value::Int(i64::from(serial)),
                Value::from(model),
                Value::Int(16),
                Value::Int(0x0002_0A01),
                Value::from("APT Stepper Motor Controller"),
                Value::Int(3),
                Value::Int(0),
                Value::Int(i64::from(channels)),
            ]);
        let mut buf = BytesMut::new();
        aptlink_frame::encode_frame(&frame, MessageRegistry::global(), &mut buf).unwrap();
        buf.to_vec()
    }

    #[test]
    fn bay_type_prefixes() {
        assert!(is_bay_type_serial("70123456"));
        assert!(is_bay_type_serial("94000001"));
        assert!(!is_bay_type_serial("83812345"));
        assert!(!is_bay_type_serial(""));
    }

    #[test]
    fn identify_and_enable_frames() {
        let mut dev = device(Scripted::new());
        dev.identify(GENERIC_USB).unwrap();
        dev.set_channel_enabled(CHANNEL_1, true, GENERIC_USB).unwrap();
        dev.set_channel_enabled(CHANNEL_2, false, BAY_1).unwrap();
        assert_eq!(
            dev.into_inner().written,
            [
                0x23, 0x02, 0x00, 0x00, 0x50, 0x01, //
                0x10, 0x02, 0x01, 0x01, 0x50, 0x01, //
                0x10, 0x02, 0x02, 0x02, 0x22, 0x01,
            ]
        );
    }

    #[test]
    fn channel_enable_state() {
        let mut dev = device(
            Scripted::new()
                .reply(&[0x12, 0x02, 0x01, 0x01, 0x01, 0x50])
                .reply(&[0x12, 0x02, 0x01, 0x02, 0x01, 0x50])
                .reply(&[0x12, 0x02, 0x01, 0x07, 0x01, 0x50]),
        );
        assert!(dev.channel_enabled(CHANNEL_1, GENERIC_USB).unwrap());
        assert!(!dev.channel_enabled(CHANNEL_1, GENERIC_USB).unwrap());
        assert!(matches!(
            dev.channel_enabled(CHANNEL_1, GENERIC_USB),
            Err(DeviceError::InvalidStatus {
                id: 0x0212,
                value: 7
            })
        ));
    }

    #[test]
    fn bay_used_reads_second_parameter() {
        let mut dev = device(
            Scripted::new()
                .reply(&[0x61, 0x00, 0x00, 0x01, 0x01, 0x11])
                .reply(&[0x61, 0x00, 0x01, 0x02, 0x01, 0x11])
                .reply(&[0x61, 0x00, 0x02, 0x00, 0x01, 0x11]),
        );
        assert!(dev.bay_used(0).unwrap());
        assert!(!dev.bay_used(1).unwrap());
        assert!(matches!(
            dev.bay_used(2),
            Err(DeviceError::InvalidStatus { value: 0, .. })
        ));

        let written = dev.into_inner().written;
        assert_eq!(&written[..6], &[0x60, 0x00, 0x00, 0x00, 0x11, 0x01]);
    }

    #[test]
    fn hardware_info_is_decoded() {
        let mut dev = device(Scripted::new().reply(&info_reply(83_812_345, "BSC201", 1, 0x50)));
        let info = dev.hardware_info(GENERIC_USB, None).unwrap();
        assert_eq!(info.serial_number, 83_812_345);
        assert_eq!(info.model, "BSC201");
        assert_eq!(info.notes, "APT Stepper Motor Controller");
        assert_eq!(info.num_channels, 1);
        assert_eq!(info.firmware_string(), "2.10.1");
    }

    #[test]
    fn hardware_info_requires_a_data_packet() {
        let mut dev = device(Scripted::new().reply(&[0x06, 0x00, 0x00, 0x00, 0x01, 0x50]));
        assert!(matches!(
            dev.hardware_info(GENERIC_USB, None),
            Err(DeviceError::UnexpectedBody { id: 0x0006 })
        ));
    }

    #[test]
    fn single_unit_channels_use_generic_address() {
        let mut dev = device(
            Scripted::new()
                .reply(&[])
                .reply(&info_reply(27_000_001, "TDC001", 2, 0x50)),
        );
        let channels = dev.discover_channels("27000001").unwrap();
        assert_eq!(
            channels,
            vec![
                ChannelAddress {
                    channel: CHANNEL_1,
                    dest: GENERIC_USB
                },
                ChannelAddress {
                    channel: CHANNEL_2,
                    dest: GENERIC_USB
                },
            ]
        );
    }

    #[test]
    fn rack_channels_follow_occupied_bays() {
        let mut dev = device(
            Scripted::new()
                .reply(&info_reply(70_000_001, "BSC103", 2, 0x11))
                // bay 0: flash programming off, then occupied, then its info
                .reply(&[])
                .reply(&[0x61, 0x00, 0x00, 0x01, 0x01, 0x11])
                .reply(&info_reply(40_000_001, "BSC103", 1, 0x21))
                // bay 1: empty
                .reply(&[])
                .reply(&[0x61, 0x00, 0x01, 0x02, 0x01, 0x11]),
        );
        let channels = dev.discover_channels("70000001").unwrap();
        assert_eq!(
            channels,
            vec![ChannelAddress {
                channel: CHANNEL_1,
                dest: 0x21
            }]
        );
    }

    #[test]
    fn initialize_enables_every_discovered_channel() {
        let mut dev = device(
            Scripted::new()
                .reply(&[])
                .reply(&info_reply(27_000_001, "TDC001", 2, 0x50)),
        );
        let controller = dev.initialize("27000001").unwrap();
        assert_eq!(controller.model(), "TDC001");
        assert_eq!(controller.channels.len(), 2);
        assert_eq!(
            dev.into_inner().written,
            [
                0x18, 0x00, 0x00, 0x00, 0x50, 0x01, // no flash programming
                0x05, 0x00, 0x00, 0x00, 0x50, 0x01, // hardware info
                0x10, 0x02, 0x01, 0x01, 0x11, 0x01, //
                0x10, 0x02, 0x01, 0x01, 0x50, 0x01, //
                0x10, 0x02, 0x01, 0x01, 0x11, 0x01, //
                0x10, 0x02, 0x02, 0x01, 0x50, 0x01,
            ]
        );
    }

    #[test]
    fn initialize_rack_reports_rack_controller() {
        let mut dev = device(
            Scripted::new()
                .reply(&info_reply(70_000_001, "BSC103", 1, 0x11))
                .reply(&[])
                .reply(&[0x61, 0x00, 0x00, 0x01, 0x01, 0x11])
                .reply(&info_reply(40_000_001, "BSC1X1", 1, 0x21)),
        );
        let controller = dev.initialize("70000001").unwrap();
        assert_eq!(controller.model(), "BSC103");
        assert_eq!(controller.info.serial_number, 70_000_001);
        assert_eq!(
            controller.channels,
            vec![ChannelAddress {
                channel: CHANNEL_1,
                dest: 0x21
            }]
        );

        let written = dev.into_inner().written;
        assert_eq!(
            &written[written.len() - 12..],
            &[
                0x10, 0x02, 0x01, 0x01, 0x11, 0x01, //
                0x10, 0x02, 0x01, 0x01, 0x21, 0x01,
            ]
        );
    }

    #[test]
    fn enable_channels_with_no_channels_writes_nothing() {
        let mut dev = device(Scripted::new());
        dev.enable_channels(&[]).unwrap();
        assert!(dev.into_inner().written.is_empty());
    }

    #[test]
    fn controller_serializes_for_reports() {
        let mut dev = device(
            Scripted::new()
                .reply(&[])
                .reply(&info_reply(27_000_001, "TDC001", 1, 0x50)),
        );
        let controller = dev.initialize("27000001").unwrap();
        let json = serde_json::to_value(&controller).unwrap();
        assert_eq!(json["info"]["model"], "TDC001");
        assert_eq!(json["info"]["serial_number"], 27_000_001);
        assert_eq!(json["info"]["num_channels"], 1);
        assert_eq!(
            json["channels"],
            serde_json::json!([{ "channel": 1, "dest": 0x50 }])
        );
    }
}
