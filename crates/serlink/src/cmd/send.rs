use std::fs::OpenOptions;

use serlink_hub::{Bridge, NullSink};
use serlink_registry::TypeRegistry;
use serlink_transport::StreamLink;

use crate::cmd::SendArgs;
use crate::exit::{hub_error, io_error, registry_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::OutputFormat;

pub fn run(args: SendArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = TypeRegistry::from_path(&args.registry)
        .map_err(|err| registry_error("catalog load failed", err))?;

    let type_id = resolve_type_id(&args, &registry)?;
    let payload = resolve_payload(&args)?;

    let device = OpenOptions::new()
        .read(true)
        .write(true)
        .open(&args.device)
        .map_err(|err| io_error(&format!("failed opening {}", args.device.display()), err))?;

    let mut bridge = Bridge::new(StreamLink::new(device), registry, NullSink);
    bridge
        .send(args.message_id, type_id, &payload)
        .map_err(|err| hub_error("send failed", err))?;

    match format {
        OutputFormat::Json => println!(
            "{{\"sent\":true,\"message_id\":{},\"type_id\":{},\"payload_len\":{}}}",
            args.message_id,
            type_id,
            payload.len()
        ),
        _ => println!(
            "sent message_id={} type_id={} payload_len={}",
            args.message_id,
            type_id,
            payload.len()
        ),
    }

    Ok(SUCCESS)
}

fn resolve_type_id(args: &SendArgs, registry: &TypeRegistry) -> CliResult<u8> {
    if let Some(id) = args.type_id {
        return Ok(id);
    }
    if let Some(name) = &args.type_name {
        return registry
            .find_by_name(name)
            .map(|entry| entry.id)
            .ok_or_else(|| CliError::new(USAGE, format!("no catalog entry named {name:?}")));
    }
    Err(CliError::new(USAGE, "one of --type-id or --type-name is required"))
}

fn resolve_payload(args: &SendArgs) -> CliResult<Vec<u8>> {
    if let Some(data) = &args.data {
        return Ok(data.as_bytes().to_vec());
    }
    if let Some(hex) = &args.hex {
        return parse_hex(hex).map_err(|err| CliError::new(USAGE, err));
    }
    Ok(Vec::new())
}

/// Parse hex bytes, tolerating space, colon, or no separators.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, String> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    if cleaned.is_empty() {
        return Err("hex input must not be empty".to_string());
    }
    if cleaned.len() % 2 != 0 {
        return Err(format!("odd number of hex digits in {input:?}"));
    }

    (0..cleaned.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&cleaned[i..i + 2], 16)
                .map_err(|_| format!("invalid hex byte {:?}", &cleaned[i..i + 2]))
        })
        .collect()
}
