//! Runs the full bridge over an in-memory loopback link: a fake device
//! pushes ADC samples, the bridge decodes them into readings, and a
//! command goes back the other way.
//!
//! ```sh
//! cargo run -p serlink --example loopback
//! ```

use bytes::BytesMut;

use serlink_frame::encode_frame;
use serlink_hub::{Bridge, ChannelSink};
use serlink_registry::TypeRegistry;
use serlink_transport::pair;

const CATALOG: &str = r#"{
    "message_types": [
        { "id": 7, "name": "adc_reading", "data_type": "u16",
          "description": "Raw ADC sample from the analog input" },
        { "id": 2, "name": "relay_command", "data_type": "u8",
          "description": "Relay on/off" }
    ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let registry = TypeRegistry::from_json(CATALOG)?;
    let (link, device) = pair();
    let (sink, readings) = ChannelSink::new();
    let mut bridge = Bridge::new(link, registry, sink);

    // The "device" transmits three samples, deliberately fragmented.
    let mut burst = Vec::new();
    for sample in [100u16, 512, 1023] {
        let mut wire = BytesMut::new();
        encode_frame(0x01, 0x07, &sample.to_be_bytes(), &mut wire)?;
        burst.extend_from_slice(&wire);
    }
    let (head, tail) = burst.split_at(9);
    device.inject(head);
    bridge.poll()?;
    device.inject(tail);
    bridge.poll()?;

    for reading in readings.try_iter() {
        println!(
            "type={} raw={} volts={:.2}",
            reading.type_id, reading.raw, reading.volts
        );
    }

    // And one command back to the device.
    bridge.send(0x01, 0x02, &[0x01])?;
    println!("device received: {:02X?}", device.written());

    Ok(())
}
