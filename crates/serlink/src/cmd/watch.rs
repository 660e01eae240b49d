use std::fs::OpenOptions;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serlink_hub::{Bridge, ChannelSink};
use serlink_registry::TypeRegistry;
use serlink_transport::StreamLink;

use crate::cmd::WatchArgs;
use crate::exit::{hub_error, io_error, registry_error, CliError, CliResult, SUCCESS};
use crate::output::{print_reading, OutputFormat};

pub fn run(args: WatchArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = TypeRegistry::from_path(&args.registry)
        .map_err(|err| registry_error("catalog load failed", err))?;

    let device = OpenOptions::new()
        .read(true)
        .write(true)
        .open(&args.device)
        .map_err(|err| io_error(&format!("failed opening {}", args.device.display()), err))?;

    let (sink, readings) = ChannelSink::new();
    let mut bridge = Bridge::new(StreamLink::new(device), registry, sink);

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    let mut printed = 0usize;

    while running.load(Ordering::SeqCst) {
        let frames = bridge
            .poll()
            .map_err(|err| hub_error("poll failed", err))?;

        for reading in readings.try_iter() {
            print_reading(&reading, bridge.registry(), format);
            printed = printed.saturating_add(1);

            if let Some(count) = args.count {
                if printed >= count {
                    return Ok(SUCCESS);
                }
            }
        }

        if !bridge.is_open() {
            tracing::info!("device closed the line");
            break;
        }
        if frames.is_empty() {
            std::thread::sleep(Duration::from_millis(args.interval_ms));
        }
    }

    Ok(SUCCESS)
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}
