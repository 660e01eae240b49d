use bytes::BytesMut;
use tracing::warn;

use crate::codec::{decode_frame, DecodedFrame, TERMINATOR};
use crate::error::{FrameError, Result};

/// Default ceiling for the accumulation buffer.
pub const DEFAULT_MAX_BUFFER: usize = 1024;

const INITIAL_BUFFER_CAPACITY: usize = 256;

/// Configuration for stream accumulation.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Ceiling on bytes buffered while waiting for a terminator. On breach
    /// the whole buffer is discarded: bounded memory wins over lossless
    /// decoding when the line is stuck or noisy.
    pub max_buffer: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            max_buffer: DEFAULT_MAX_BUFFER,
        }
    }
}

/// Converts an arbitrarily fragmented byte stream into decoded frames.
///
/// Owns a private buffer; each serial line gets its own accumulator and a
/// single logical caller feeds it received bytes in arrival order. Partial
/// frames survive between calls, so callers never manage buffering.
#[derive(Debug)]
pub struct StreamAccumulator {
    buf: BytesMut,
    config: StreamConfig,
}

impl StreamAccumulator {
    /// Create an accumulator with default configuration.
    pub fn new() -> Self {
        Self::with_config(StreamConfig::default())
    }

    /// Create an accumulator with explicit configuration.
    pub fn with_config(config: StreamConfig) -> Self {
        Self {
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Append received bytes and extract every frame they complete.
    ///
    /// Each terminator-bounded candidate is decoded in order; a structurally
    /// bad candidate takes its slot in the batch as an `Err` and never stops
    /// extraction of the candidates buffered behind it. If the residual
    /// buffer then exceeds the ceiling it is discarded and the batch ends
    /// with [`FrameError::BufferOverflow`].
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Result<DecodedFrame>> {
        self.buf.extend_from_slice(bytes);

        let mut out = Vec::new();
        while let Some(idx) = self.buf.iter().position(|&b| b == TERMINATOR) {
            let candidate = self.buf.split_to(idx + 1);
            out.push(decode_frame(&candidate));
        }

        if self.buf.len() > self.config.max_buffer {
            let size = self.buf.len();
            warn!(
                size,
                max = self.config.max_buffer,
                "receive buffer ceiling breached, discarding"
            );
            self.buf.clear();
            out.push(Err(FrameError::BufferOverflow {
                size,
                max: self.config.max_buffer,
            }));
        }

        out
    }

    /// Bytes currently buffered waiting for a terminator.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Discard any buffered partial frame.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Current accumulator configuration.
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }
}

impl Default for StreamAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
