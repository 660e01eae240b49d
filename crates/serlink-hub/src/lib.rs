//! The glue layer: one serial link, one accumulator, one fan-out sink.
//!
//! [`Bridge`] is the "just works" type. Point it at anything implementing
//! `SerialLink`, give it the message type catalog and a [`ReadingSink`],
//! then drive [`Bridge::poll`] from whatever loop owns the line. Commands
//! go out through [`Bridge::send`].

pub mod bridge;
pub mod dispatch;
pub mod error;
pub mod reading;

pub use bridge::{Bridge, BridgeConfig, DEFAULT_READ_CHUNK};
pub use dispatch::{ChannelSink, NullSink, ReadingSink};
pub use error::{HubError, Result};
pub use reading::{adc_to_volts, raw_value, Reading, ADC_FULL_SCALE, ADC_REFERENCE_VOLTS};
