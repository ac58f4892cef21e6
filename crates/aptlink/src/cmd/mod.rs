use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::Duration;

use aptlink_codec::{FieldKind, MessageDescriptor, Value};
use aptlink_device::{AptDevice, DeviceConfig};
use aptlink_transport::TransportConfig;
use clap::{Args, Subcommand};

use crate::exit::{io_error, CliError, CliResult};
use crate::output::OutputFormat;

pub mod decode;
pub mod describe;
pub mod encode;
pub mod ids;
pub mod info;
pub mod monitor;
pub mod query;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every known message identifier.
    Ids,
    /// Show the payload layout of a message.
    Describe(DescribeArgs),
    /// Print the wire bytes of a frame.
    Encode(EncodeArgs),
    /// Parse a captured frame given as hex.
    Decode(DecodeArgs),
    /// Send one request to a device and print the response.
    Query(QueryArgs),
    /// Print frames from a device as they arrive.
    Monitor(MonitorArgs),
    /// Request hardware information from a device.
    Info(InfoArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Ids => ids::run(format),
        Command::Describe(args) => describe::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Query(args) => query::run(args, format),
        Command::Monitor(args) => monitor::run(args, format),
        Command::Info(args) => info::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Addressing shared by every command that builds a frame.
#[derive(Args, Debug, Clone)]
pub struct AddressArgs {
    /// Destination address (e.g. 0x50, 0x21).
    #[arg(long, default_value = "0x50", value_parser = parse_u8)]
    pub dest: u8,
    /// Source address.
    #[arg(long, default_value = "0x01", value_parser = parse_u8)]
    pub source: u8,
}

/// Device path and link timing.
#[derive(Args, Debug, Clone)]
pub struct LinkArgs {
    /// Character device of an already configured serial link.
    #[arg(env = "APTLINK_DEVICE")]
    pub device: PathBuf,
    /// Bound for each read stage (e.g. 500ms, 2s).
    #[arg(long, env = "APTLINK_READ_TIMEOUT", default_value = "500ms")]
    pub read_timeout: String,
}

#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Message name (MOT_MOVE_HOME) or identifier (0x0443).
    pub id: String,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Message name or identifier.
    pub id: String,
    /// Payload values in layout order. Omit for a header-only frame.
    #[arg(allow_negative_numbers = true)]
    pub values: Vec<String>,
    /// First parameter byte of a header-only frame.
    #[arg(long, default_value = "0", value_parser = parse_u8, conflicts_with = "values")]
    pub param1: u8,
    /// Second parameter byte of a header-only frame.
    #[arg(long, default_value = "0", value_parser = parse_u8, conflicts_with = "values")]
    pub param2: u8,
    #[command(flatten)]
    pub address: AddressArgs,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Frame bytes as hex; spaces, colons and commas are ignored.
    pub hex: Vec<String>,
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    #[command(flatten)]
    pub link: LinkArgs,
    /// Request message name or identifier.
    pub request: String,
    /// Expected response message name or identifier.
    pub response: String,
    /// Request payload value, repeatable, in layout order.
    #[arg(long = "value", allow_negative_numbers = true)]
    pub values: Vec<String>,
    #[arg(long, default_value = "0", value_parser = parse_u8)]
    pub param1: u8,
    #[arg(long, default_value = "0", value_parser = parse_u8)]
    pub param2: u8,
    #[command(flatten)]
    pub address: AddressArgs,
    /// Keep retrying timed-out reads for this long (e.g. 60s).
    #[arg(long)]
    pub timeout: Option<String>,
}

#[derive(Args, Debug)]
pub struct MonitorArgs {
    #[command(flatten)]
    pub link: LinkArgs,
    /// Exit after printing N frames.
    #[arg(long)]
    pub count: Option<usize>,
    /// Only print frames with these identifiers (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub only: Option<Vec<String>>,
    /// Ask the controller to start sending status updates first.
    #[arg(long)]
    pub start_updates: bool,
    /// Address that receives the update request.
    #[arg(long, default_value = "0x50", value_parser = parse_u8)]
    pub dest: u8,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub link: LinkArgs,
    /// Module to ask (0x50 for single units, 0x11 or a bay for racks).
    #[arg(long, default_value = "0x50", value_parser = parse_u8)]
    pub dest: u8,
    /// Keep retrying for this long while the controller starts up.
    #[arg(long, default_value = "5s")]
    pub timeout: String,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::usage("duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "ms")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::usage(format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::usage("duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        _ => Ok(Duration::from_secs(value)),
    }
}

pub fn parse_u8(input: &str) -> Result<u8, String> {
    let parsed = match input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => input.parse(),
    };
    parsed.map_err(|_| format!("expected a byte (0-255 or 0x00-0xff), got {input:?}"))
}

pub fn parse_message_id(input: &str) -> CliResult<u16> {
    aptlink_codec::ids::parse(input)
        .ok_or_else(|| CliError::usage(format!("unknown message: {input}")))
}

/// Parse command-line strings into values following the layout.
pub fn parse_values(desc: &MessageDescriptor, raw: &[String]) -> CliResult<Vec<Value>> {
    let kinds: Vec<FieldKind> = desc
        .fields
        .iter()
        .copied()
        .filter(|kind| kind.carries_value())
        .collect();
    if kinds.len() != raw.len() {
        return Err(CliError::usage(format!(
            "{:#06x} takes {} values, got {}",
            desc.id,
            kinds.len(),
            raw.len()
        )));
    }

    kinds
        .iter()
        .zip(raw)
        .enumerate()
        .map(|(index, (kind, text))| {
            parse_value(*kind, text).ok_or_else(|| {
                CliError::usage(format!("value {index} ({kind}) is not valid: {text:?}"))
            })
        })
        .collect()
}

fn parse_value(kind: FieldKind, text: &str) -> Option<Value> {
    match kind {
        FieldKind::F32 => text.parse::<f32>().ok().map(Value::Float),
        FieldKind::Bytes(_) => Some(Value::Bytes(text.as_bytes().to_vec())),
        _ => {
            let (negative, digits) = match text.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, text),
            };
            let magnitude = match digits
                .strip_prefix("0x")
                .or_else(|| digits.strip_prefix("0X"))
            {
                Some(hex) => i64::from_str_radix(hex, 16).ok()?,
                None => digits.parse::<i64>().ok()?,
            };
            Some(Value::Int(if negative { -magnitude } else { magnitude }))
        }
    }
}

/// Parse hex text into bytes, ignoring separators and an optional 0x prefix.
pub fn parse_hex(parts: &[String]) -> CliResult<Vec<u8>> {
    let joined: String = parts
        .iter()
        .flat_map(|part| part.split([' ', ':', ',']))
        .map(|chunk| chunk.trim_start_matches("0x").trim_start_matches("0X"))
        .collect();
    if !joined.is_ascii() {
        return Err(CliError::usage("hex input must be ASCII"));
    }
    if joined.len() % 2 != 0 {
        return Err(CliError::usage("hex input has an odd number of digits"));
    }

    joined
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            let text = String::from_utf8_lossy(pair);
            u8::from_str_radix(&text, 16)
                .map_err(|_| CliError::usage(format!("invalid hex byte: {text}")))
        })
        .collect()
}

/// Open the device node and wrap it with the requested timing.
///
/// The line itself (baud rate, flow control) must already be configured.
pub fn open_device(link: &LinkArgs) -> CliResult<AptDevice<File>> {
    let read_timeout = parse_duration(&link.read_timeout)?;
    let file = open_rw(&link.device)?;
    let config = DeviceConfig {
        transport: TransportConfig {
            read_timeout,
            ..TransportConfig::default()
        },
        ..DeviceConfig::default()
    };
    Ok(AptDevice::with_config(file, config))
}

fn open_rw(path: &Path) -> CliResult<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|err| io_error(&format!("failed opening {}", path.display()), err))
}

#[cfg(test)]
mod tests {
    use aptlink_codec::MessageRegistry;

    use super::*;

    #[test]
    fn parse_duration_seconds_and_millis() {
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("150ms").unwrap(), Duration::from_millis(150));
        assert_eq!(parse_duration("300").unwrap(), Duration::from_millis(300));
    }

    #[test]
    fn parse_duration_rejects_invalid_values() {
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("bad").is_err());
        assert!(parse_duration("").is_err());
    }

    #[test]
    fn parse_u8_accepts_hex_and_decimal() {
        assert_eq!(parse_u8("0x50"), Ok(0x50));
        assert_eq!(parse_u8("33"), Ok(33));
        assert!(parse_u8("0x100").is_err());
    }

    #[test]
    fn parse_values_follow_layout() {
        let desc = MessageRegistry::global().lookup(0x0453).unwrap();
        let values = parse_values(desc, &["1".into(), "-0x10".into()]).unwrap();
        assert_eq!(values, vec![Value::Int(1), Value::Int(-16)]);

        let err = parse_values(desc, &["1".into()]).unwrap_err();
        assert_eq!(err.code, crate::exit::USAGE);

        let desc = MessageRegistry::global().lookup(0x0606).unwrap();
        assert_eq!(
            parse_values(desc, &["0.5".into()]).unwrap(),
            vec![Value::Float(0.5)]
        );
    }

    #[test]
    fn parse_hex_ignores_separators() {
        assert_eq!(
            parse_hex(&["47 04:01,00".into(), "0x50".into(), "01".into()]).unwrap(),
            vec![0x47, 0x04, 0x01, 0x00, 0x50, 0x01]
        );
        assert!(parse_hex(&["470".into()]).is_err());
        assert!(parse_hex(&["zz".into()]).is_err());
    }

    #[test]
    fn parse_hex_rejects_non_ascii_input() {
        let err = parse_hex(&["aé4".into()]).unwrap_err();
        assert_eq!(err.code, crate::exit::USAGE);

        let err = parse_hex(&["é1".into()]).unwrap_err();
        assert_eq!(err.code, crate::exit::USAGE);
    }
}
