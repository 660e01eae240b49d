use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod send;
pub mod types;
pub mod version;
pub mod watch;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Attach to a device and print decoded readings.
    Watch(WatchArgs),
    /// Encode a command frame and send it to a device.
    Send(SendArgs),
    /// Print the message type catalog.
    Types(TypesArgs),
    /// Decode a hex-encoded frame offline.
    Decode(DecodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Watch(args) => watch::run(args, format),
        Command::Send(args) => send::run(args, format),
        Command::Types(args) => types::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Device path (e.g. /dev/ttyUSB0).
    pub device: PathBuf,
    /// Message type catalog (JSON).
    #[arg(long, short = 'r', default_value = "message_types.json")]
    pub registry: PathBuf,
    /// Exit after printing N readings.
    #[arg(long)]
    pub count: Option<usize>,
    /// Pause between empty polls, in milliseconds.
    #[arg(long, default_value_t = 20)]
    pub interval_ms: u64,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Device path (e.g. /dev/ttyUSB0).
    pub device: PathBuf,
    /// Message type catalog (JSON).
    #[arg(long, short = 'r', default_value = "message_types.json")]
    pub registry: PathBuf,
    /// Numeric type id to stamp on the frame.
    #[arg(long, conflicts_with = "type_name")]
    pub type_id: Option<u8>,
    /// Catalog name of the type to stamp on the frame.
    #[arg(long, conflicts_with = "type_id")]
    pub type_name: Option<String>,
    /// Message id tag for this transmission.
    #[arg(long, default_value_t = 1)]
    pub message_id: u8,
    /// Payload as a raw string.
    #[arg(long, conflicts_with = "hex")]
    pub data: Option<String>,
    /// Payload as hex bytes (e.g. "03" or "01 FF").
    #[arg(long, conflicts_with = "data")]
    pub hex: Option<String>,
}

#[derive(Args, Debug)]
pub struct TypesArgs {
    /// Message type catalog (JSON).
    #[arg(long, short = 'r', default_value = "message_types.json")]
    pub registry: PathBuf,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Hex bytes of one complete frame, terminator included.
    pub hex: String,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
