use std::io::IsTerminal;
use std::time::{SystemTime, UNIX_EPOCH};

use aptlink_codec::{ids, is_variable_length, MessageDescriptor, MessageRegistry, Value};
use aptlink_device::HardwareInfo;
use aptlink_frame::{hex, Frame, FrameBody};
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct FrameOutput<'a> {
    id: u16,
    id_hex: String,
    name: Option<&'a str>,
    dest: u8,
    source: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<[u8; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<&'a [Value]>,
    timestamp: String,
}

pub fn print_frame(frame: &Frame, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = FrameOutput {
                id: frame.id,
                id_hex: format!("{:#06x}", frame.id),
                name: ids::name(frame.id),
                dest: frame.dest,
                source: frame.source,
                params: frame.params().map(|(p1, p2)| [p1, p2]),
                payload: frame.payload(),
                timestamp: now_unix_seconds(),
            };
            print_json(&out);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ID", "NAME", "DEST", "SOURCE", "BODY"])
                .add_row(vec![
                    format!("{:#06x}", frame.id),
                    display_name(frame.id).to_string(),
                    format!("{:#04x}", frame.dest),
                    format!("{:#04x}", frame.source),
                    body_text(&frame.body),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "{:#06x} {} dest={:#04x} source={:#04x} {}",
                frame.id,
                display_name(frame.id),
                frame.dest,
                frame.source,
                body_text(&frame.body)
            );
        }
    }
}

#[derive(Serialize)]
struct WireOutput<'a> {
    id: u16,
    name: Option<&'a str>,
    len: usize,
    hex: String,
}

pub fn print_wire(frame: &Frame, wire: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&WireOutput {
            id: frame.id,
            name: ids::name(frame.id),
            len: wire.len(),
            hex: hex(wire),
        }),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ID", "NAME", "LEN", "BYTES"])
                .add_row(vec![
                    format!("{:#06x}", frame.id),
                    display_name(frame.id).to_string(),
                    wire.len().to_string(),
                    hex(wire),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => println!("{}", hex(wire)),
    }
}

#[derive(Serialize)]
struct IdOutput<'a> {
    id: u16,
    id_hex: String,
    name: &'a str,
    payload_len: Option<usize>,
    variable_length: bool,
}

pub fn print_ids(registry: &MessageRegistry, format: OutputFormat) {
    let rows: Vec<IdOutput<'_>> = ids::ALL
        .iter()
        .map(|(id, name)| IdOutput {
            id: *id,
            id_hex: format!("{id:#06x}"),
            name: *name,
            payload_len: registry.descriptor(*id).map(MessageDescriptor::encoded_len),
            variable_length: is_variable_length(*id),
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ID", "NAME", "PAYLOAD"]);
            for row in &rows {
                table.add_row(vec![
                    row.id_hex.clone(),
                    row.name.to_string(),
                    payload_text(row),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for row in &rows {
                println!("{} {:<44} {}", row.id_hex, row.name, payload_text(row));
            }
        }
    }
}

fn payload_text(row: &IdOutput<'_>) -> String {
    match (row.payload_len, row.variable_length) {
        (_, true) => "variable".to_string(),
        (Some(len), _) => format!("{len} bytes"),
        (None, _) => "-".to_string(),
    }
}

#[derive(Serialize)]
struct FieldOutput {
    index: usize,
    kind: String,
    offset: usize,
    size: usize,
}

#[derive(Serialize)]
struct DescriptorOutput<'a> {
    id: u16,
    id_hex: String,
    name: Option<&'a str>,
    payload_len: usize,
    fields: Vec<FieldOutput>,
}

pub fn print_descriptor(desc: &MessageDescriptor, format: OutputFormat) {
    let mut offset = 0usize;
    let fields: Vec<FieldOutput> = desc
        .fields
        .iter()
        .enumerate()
        .map(|(index, kind)| {
            let field = FieldOutput {
                index,
                kind: kind.to_string(),
                offset,
                size: kind.size(),
            };
            offset += kind.size();
            field
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&DescriptorOutput {
            id: desc.id,
            id_hex: format!("{:#06x}", desc.id),
            name: desc.name,
            payload_len: desc.encoded_len(),
            fields,
        }),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["#", "KIND", "OFFSET", "SIZE"]);
            for field in &fields {
                table.add_row(vec![
                    field.index.to_string(),
                    field.kind.clone(),
                    field.offset.to_string(),
                    field.size.to_string(),
                ]);
            }
            println!(
                "{:#06x} {} ({} bytes)",
                desc.id,
                display_name(desc.id),
                desc.encoded_len()
            );
            println!("{table}");
        }
        OutputFormat::Pretty => {
            let kinds: Vec<String> = fields.iter().map(|f| f.kind.clone()).collect();
            println!(
                "{:#06x} {} [{}] {} bytes",
                desc.id,
                display_name(desc.id),
                kinds.join(", "),
                desc.encoded_len()
            );
        }
    }
}

pub fn print_hardware_info(info: &HardwareInfo, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(info),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"])
                .add_row(vec!["serial".to_string(), info.serial_number.to_string()])
                .add_row(vec!["model".to_string(), info.model.clone()])
                .add_row(vec!["type".to_string(), info.hardware_type.to_string()])
                .add_row(vec!["firmware".to_string(), info.firmware_string()])
                .add_row(vec!["hardware".to_string(), info.hardware_version.to_string()])
                .add_row(vec!["channels".to_string(), info.num_channels.to_string()])
                .add_row(vec!["notes".to_string(), info.notes.clone()]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "{} serial={} firmware={} channels={} notes={}",
                info.model,
                info.serial_number,
                info.firmware_string(),
                info.num_channels,
                info.notes
            );
        }
    }
}

fn body_text(body: &FrameBody) -> String {
    match body {
        FrameBody::Params { param1, param2 } => format!("params={param1},{param2}"),
        FrameBody::Payload(values) => {
            let values: Vec<String> = values.iter().map(ToString::to_string).collect();
            format!("payload=[{}]", values.join(", "))
        }
    }
}

fn display_name(id: u16) -> &'static str {
    ids::name(id).unwrap_or("UNKNOWN")
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

fn now_unix_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_text_renders_params_and_values() {
        assert_eq!(
            body_text(&FrameBody::Params {
                param1: 1,
                param2: 2
            }),
            "params=1,2"
        );
        assert_eq!(
            body_text(&FrameBody::Payload(vec![Value::Int(-3), Value::Float(0.5)])),
            "payload=[-3, 0.5]"
        );
    }
}
