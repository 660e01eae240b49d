use bytes::{BufMut, Bytes, BytesMut};

use crate::checksum::checksum;
use crate::error::{FrameError, Result};

/// Frame terminator byte (`\n`).
pub const TERMINATOR: u8 = 0x0A;

/// Header: message id (1) + payload length (1) + type id (1).
pub const HEADER_SIZE: usize = 3;

/// Trailer: checksum (1) + terminator (1).
pub const TRAILER_SIZE: usize = 2;

/// Smallest structurally valid frame (empty payload).
pub const MIN_FRAME_LEN: usize = HEADER_SIZE + TRAILER_SIZE;

/// The payload length must fit the single length byte.
pub const MAX_PAYLOAD: usize = u8::MAX as usize;

/// A decoded frame.
///
/// A checksum mismatch still yields a fully populated frame with
/// `checksum_ok` cleared. Corruption is reported, not thrown; the caller
/// decides whether to drop, log, or request a retransmit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    /// Caller-chosen tag for this transmission.
    pub message_id: u8,
    /// Payload length as declared in the header.
    pub payload_len: u8,
    /// Semantic type identifier, resolved against a registry elsewhere.
    pub type_id: u8,
    /// The payload bytes.
    pub payload: Bytes,
    /// Checksum byte as transmitted.
    pub checksum: u8,
    /// Whether the transmitted checksum matches the recomputed one.
    pub checksum_ok: bool,
}

impl DecodedFrame {
    /// The wire size this frame occupied, terminator included.
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.payload.len() + TRAILER_SIZE
    }
}

/// Encode a frame into the wire format.
///
/// Wire format:
/// ```text
/// ┌────────────┬─────────────┬──────────┬────────────────┬──────────┬────────────┐
/// │ Message ID │ Payload Len │ Type ID  │ Payload         │ Checksum │ Terminator │
/// │ (1B)       │ (1B)        │ (1B)     │ (Len bytes)     │ (1B)     │ 0x0A       │
/// └────────────┴─────────────┴──────────┴────────────────┴──────────┴────────────┘
/// ```
///
/// The checksum covers the message id and payload. Payloads longer than
/// 255 bytes are rejected with [`FrameError::PayloadTooLarge`]; the length
/// byte is never silently narrowed.
pub fn encode_frame(message_id: u8, type_id: u8, payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if payload.len() > MAX_PAYLOAD {
        return Err(FrameError::PayloadTooLarge { len: payload.len() });
    }
    dst.reserve(HEADER_SIZE + payload.len() + TRAILER_SIZE);
    dst.put_u8(message_id);
    dst.put_u8(payload.len() as u8);
    dst.put_u8(type_id);
    dst.put_slice(payload);
    dst.put_u8(checksum(message_id, payload));
    dst.put_u8(TERMINATOR);
    Ok(())
}

/// Decode one delimiter-bounded candidate, terminator included.
///
/// Structural validation runs in a fixed order: minimum length, declared
/// payload length fits before the trailer, terminator present. Only then is
/// the checksum recomputed. A mismatch is not an error; it clears
/// `checksum_ok` on the returned frame.
pub fn decode_frame(candidate: &[u8]) -> Result<DecodedFrame> {
    let len = candidate.len();
    if len < MIN_FRAME_LEN {
        return Err(FrameError::Malformed { len });
    }

    let message_id = candidate[0];
    let payload_len = candidate[1];
    let type_id = candidate[2];

    let declared = payload_len as usize;
    if HEADER_SIZE + declared > len - TRAILER_SIZE {
        return Err(FrameError::LengthMismatch {
            declared,
            frame_len: len,
        });
    }

    if candidate[len - 1] != TERMINATOR {
        return Err(FrameError::MissingTerminator {
            found: candidate[len - 1],
        });
    }

    let payload = Bytes::copy_from_slice(&candidate[HEADER_SIZE..HEADER_SIZE + declared]);
    let transmitted = candidate[len - TRAILER_SIZE];
    let checksum_ok = transmitted == checksum(message_id, &payload);

    Ok(DecodedFrame {
        message_id,
        payload_len,
        type_id,
        payload,
        checksum: transmitted,
        checksum_ok,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let mut wire = BytesMut::new();
        encode_frame(0x2A, 0x05, b"reading", &mut wire).unwrap();

        let frame = decode_frame(&wire).unwrap();
        assert_eq!(frame.message_id, 0x2A);
        assert_eq!(frame.payload_len, 7);
        assert_eq!(frame.type_id, 0x05);
        assert_eq!(frame.payload.as_ref(), b"reading");
        assert!(frame.checksum_ok);
        assert_eq!(frame.wire_size(), wire.len());
    }

    #[test]
    fn known_wire_vector() {
        let mut wire = BytesMut::new();
        encode_frame(0x01, 0x07, &[0x03], &mut wire).unwrap();
        assert_eq!(wire.as_ref(), &[0x01, 0x01, 0x07, 0x03, 0x04, 0x0A]);

        let frame = decode_frame(&wire).unwrap();
        assert_eq!(frame.message_id, 1);
        assert_eq!(frame.payload_len, 1);
        assert_eq!(frame.type_id, 7);
        assert_eq!(frame.payload.as_ref(), &[0x03]);
        assert_eq!(frame.checksum, 4);
        assert!(frame.checksum_ok);
    }

    #[test]
    fn empty_payload_roundtrip() {
        let mut wire = BytesMut::new();
        encode_frame(0x09, 0x01, &[], &mut wire).unwrap();
        assert_eq!(wire.len(), MIN_FRAME_LEN);

        let frame = decode_frame(&wire).unwrap();
        assert!(frame.payload.is_empty());
        assert!(frame.checksum_ok);
    }

    #[test]
    fn max_payload_roundtrip() {
        let payload = vec![0xA5u8; MAX_PAYLOAD];
        let mut wire = BytesMut::new();
        encode_frame(0x01, 0x02, &payload, &mut wire).unwrap();

        let frame = decode_frame(&wire).unwrap();
        assert_eq!(frame.payload_len, 255);
        assert_eq!(frame.payload.as_ref(), payload.as_slice());
        assert!(frame.checksum_ok);
    }

    #[test]
    fn oversized_payload_rejected() {
        let payload = vec![0u8; MAX_PAYLOAD + 1];
        let mut wire = BytesMut::new();
        let err = encode_frame(0x01, 0x02, &payload, &mut wire).unwrap_err();
        assert_eq!(err, FrameError::PayloadTooLarge { len: 256 });
        assert!(wire.is_empty());
    }

    #[test]
    fn short_candidate_is_malformed() {
        let err = decode_frame(&[0x01, 0x00, 0x07]).unwrap_err();
        assert_eq!(err, FrameError::Malformed { len: 3 });
    }

    #[test]
    fn declared_length_beyond_frame_is_mismatch() {
        // Header declares 4 payload bytes but only 1 fits before the trailer.
        let candidate = [0x01, 0x04, 0x07, 0x03, 0x04, 0x0A];
        let err = decode_frame(&candidate).unwrap_err();
        assert_eq!(
            err,
            FrameError::LengthMismatch {
                declared: 4,
                frame_len: 6
            }
        );
    }

    #[test]
    fn wrong_last_byte_is_missing_terminator() {
        let candidate = [0x01, 0x01, 0x07, 0x03, 0x04, 0x00];
        let err = decode_frame(&candidate).unwrap_err();
        assert_eq!(err, FrameError::MissingTerminator { found: 0x00 });
    }

    #[test]
    fn corrupted_payload_clears_checksum_flag() {
        let mut wire = BytesMut::new();
        encode_frame(0x01, 0x07, &[0x03], &mut wire).unwrap();
        wire[3] ^= 0x01; // flip a payload bit

        let frame = decode_frame(&wire).unwrap();
        assert!(!frame.checksum_ok);
        assert_eq!(frame.payload.as_ref(), &[0x02]);
        assert_eq!(frame.checksum, 4);
    }

    #[test]
    fn corrupted_message_id_clears_checksum_flag() {
        let mut wire = BytesMut::new();
        encode_frame(0x01, 0x07, &[0x03], &mut wire).unwrap();
        wire[0] = 0x02;

        let frame = decode_frame(&wire).unwrap();
        assert!(!frame.checksum_ok);
        assert_eq!(frame.message_id, 2);
    }

    #[test]
    fn mod_255_collision_still_validates() {
        // A 0x00 byte and a 0xFF byte contribute the same residue, so this
        // particular corruption is invisible to the checksum. The flag must
        // follow the formula, not a stronger guarantee.
        let mut wire = BytesMut::new();
        encode_frame(0x01, 0x07, &[0x00, 0x01], &mut wire).unwrap();
        wire[3] = 0xFF;

        let frame = decode_frame(&wire).unwrap();
        assert!(frame.checksum_ok);
    }

    #[test]
    fn tolerates_slack_between_payload_and_trailer() {
        // Declared length 1, but two bytes sit before the trailer. The
        // length check is an inequality; the checksum covers only the
        // declared payload.
        let candidate = [0x01, 0x01, 0x07, 0x03, 0x63, 0x04, 0x0A];
        let frame = decode_frame(&candidate).unwrap();
        assert_eq!(frame.payload.as_ref(), &[0x03]);
        assert!(frame.checksum_ok);
    }
}
