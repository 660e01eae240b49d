//! Additive mod-255 checksum.

/// Compute the checksum over a message id and payload.
///
/// `(message_id + sum(payload)) % 255`, truncated to a byte. Encoder and
/// decoder both call this exact function, so a mismatch on the wire can
/// only mean corruption in transit.
pub fn checksum(message_id: u8, payload: &[u8]) -> u8 {
    let sum = payload
        .iter()
        .fold(u32::from(message_id), |acc, &b| acc + u32::from(b));
    (sum % 255) as u8
}
