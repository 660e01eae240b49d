use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use serlink_frame::DecodedFrame;
use serlink_hub::Reading;
use serlink_registry::TypeRegistry;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct ReadingOutput<'a> {
    message_id: u8,
    type_id: u8,
    type_name: Option<&'a str>,
    raw: u32,
    volts: f32,
}

pub fn print_reading(reading: &Reading, registry: &TypeRegistry, format: OutputFormat) {
    let type_name = registry.get(reading.type_id).map(|t| t.name.as_str());
    match format {
        OutputFormat::Json => {
            let out = ReadingOutput {
                message_id: reading.message_id,
                type_id: reading.type_id,
                type_name,
                raw: reading.raw,
                volts: reading.volts,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["TYPE", "RAW", "VOLTS"])
                .add_row(vec![
                    type_name.unwrap_or("?").to_string(),
                    reading.raw.to_string(),
                    format!("{:.2}", reading.volts),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "type={} ({}) raw={} volts={:.2}",
                reading.type_id,
                type_name.unwrap_or("?"),
                reading.raw,
                reading.volts
            );
        }
    }
}

#[derive(Serialize)]
struct FrameOutput {
    message_id: u8,
    payload_len: u8,
    type_id: u8,
    payload: String,
    checksum: u8,
    checksum_ok: bool,
}

pub fn print_frame(frame: &DecodedFrame, format: OutputFormat) {
    let payload = hex_string(frame.payload.as_ref());
    match format {
        OutputFormat::Json => {
            let out = FrameOutput {
                message_id: frame.message_id,
                payload_len: frame.payload_len,
                type_id: frame.type_id,
                payload,
                checksum: frame.checksum,
                checksum_ok: frame.checksum_ok,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"])
                .add_row(vec!["message_id".to_string(), frame.message_id.to_string()])
                .add_row(vec![
                    "payload_len".to_string(),
                    frame.payload_len.to_string(),
                ])
                .add_row(vec!["type_id".to_string(), frame.type_id.to_string()])
                .add_row(vec!["payload".to_string(), payload])
                .add_row(vec![
                    "checksum".to_string(),
                    format!("0x{:02X}", frame.checksum),
                ])
                .add_row(vec!["checksum_ok".to_string(), frame.checksum_ok.to_string()]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "message_id={} len={} type_id={} payload=[{}] checksum=0x{:02X} valid={}",
                frame.message_id,
                frame.payload_len,
                frame.type_id,
                payload,
                frame.checksum,
                frame.checksum_ok
            );
        }
    }
}

pub fn print_types(registry: &TypeRegistry, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(&registry.entries())
                    .unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ID", "NAME", "DATA TYPE", "DESCRIPTION"]);
            for entry in registry.entries() {
                table.add_row(vec![
                    entry.id.to_string(),
                    entry.name.clone(),
                    entry.data_type.clone(),
                    entry.description.clone(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for entry in registry.entries() {
                println!(
                    "{:>3}  {:<20} {:<8} {}",
                    entry.id, entry.name, entry.data_type, entry.description
                );
            }
        }
    }
}

pub fn hex_string(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}
