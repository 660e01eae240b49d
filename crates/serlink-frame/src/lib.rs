//! Delimiter-terminated sensor message framing.
//!
//! This is the core value-add layer of serlink. Every message on the wire is:
//! - A 3-byte header: message id, payload length, message type id
//! - The payload (0–255 bytes)
//! - A 1-byte additive checksum over message id and payload
//! - A 1-byte terminator (`0x0A`)
//!
//! [`StreamAccumulator`] turns the arbitrarily fragmented byte stream a
//! serial line produces into discrete decoded frames; [`encode_frame`] and
//! [`decode_frame`] are the single-frame codec underneath it.

pub mod accumulator;
pub mod checksum;
pub mod codec;
pub mod error;

pub use accumulator::{StreamAccumulator, StreamConfig, DEFAULT_MAX_BUFFER};
pub use checksum::checksum;
pub use codec::{
    decode_frame, encode_frame, DecodedFrame, HEADER_SIZE, MAX_PAYLOAD, MIN_FRAME_LEN, TERMINATOR,
};
pub use error::{FrameError, Result};
