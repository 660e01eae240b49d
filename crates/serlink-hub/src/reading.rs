use serde::Serialize;

use serlink_frame::DecodedFrame;

/// ADC reference voltage of the attached board.
pub const ADC_REFERENCE_VOLTS: f32 = 5.0;

/// Full-scale count of the board's 10-bit converter.
pub const ADC_FULL_SCALE: u32 = 1023;

/// A numeric reading derived from one checksum-valid frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    /// Message id of the originating frame.
    pub message_id: u8,
    /// Wire type id of the originating frame.
    pub type_id: u8,
    /// Payload folded big-endian into a raw counter value.
    pub raw: u32,
    /// Raw value scaled against the ADC reference.
    pub volts: f32,
}

impl Reading {
    /// Derive a reading from a decoded frame.
    pub fn from_frame(frame: &DecodedFrame) -> Self {
        let raw = raw_value(&frame.payload);
        Self {
            message_id: frame.message_id,
            type_id: frame.type_id,
            raw,
            volts: adc_to_volts(raw),
        }
    }
}

/// Fold payload bytes big-endian into a raw counter.
///
/// Only the low four bytes are significant; anything above shifts out.
pub fn raw_value(payload: &[u8]) -> u32 {
    payload
        .iter()
        .fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
}

/// Scale a raw ADC count to volts.
pub fn adc_to_volts(raw: u32) -> f32 {
    raw as f32 * (ADC_REFERENCE_VOLTS / ADC_FULL_SCALE as f32)
}
