/// Errors that can occur during frame encoding, decoding, and accumulation.
///
/// A checksum mismatch is deliberately absent: structurally sound frames
/// with a bad checksum decode successfully and carry a cleared
/// `checksum_ok` flag instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// The candidate is too short to hold header, checksum, and terminator.
    #[error("frame too short ({len} bytes, minimum 5)")]
    Malformed { len: usize },

    /// The declared payload length does not fit inside the frame.
    #[error("declared payload length {declared} does not fit a {frame_len}-byte frame")]
    LengthMismatch { declared: usize, frame_len: usize },

    /// The last byte of the candidate is not the terminator.
    #[error("missing terminator (last byte 0x{found:02X})")]
    MissingTerminator { found: u8 },

    /// The payload cannot be described by the single length byte.
    #[error("payload too large ({len} bytes, max 255)")]
    PayloadTooLarge { len: usize },

    /// The accumulation buffer exceeded its ceiling and was discarded.
    #[error("receive buffer overflowed ({size} bytes, ceiling {max}); buffer discarded")]
    BufferOverflow { size: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, FrameError>;
