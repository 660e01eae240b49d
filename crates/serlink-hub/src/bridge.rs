use bytes::BytesMut;
use tracing::{debug, warn};

use serlink_frame::{encode_frame, DecodedFrame, StreamAccumulator, StreamConfig};
use serlink_registry::TypeRegistry;
use serlink_transport::{SerialLink, TransportError};

use crate::dispatch::ReadingSink;
use crate::error::{HubError, Result};
use crate::reading::Reading;

/// Bytes requested from the link per poll.
pub const DEFAULT_READ_CHUNK: usize = 256;

/// Bridge behavior configuration.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Size of a single read from the link.
    pub read_chunk: usize,
    /// Stream accumulation limits.
    pub stream: StreamConfig,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            read_chunk: DEFAULT_READ_CHUNK,
            stream: StreamConfig::default(),
        }
    }
}

/// Connects one serial link to the frame codec and a reading sink.
///
/// The bridge owns its accumulator, so one bridge serves exactly one line
/// and must be driven from a single logical caller. Poll and send are
/// sequential, never reentrant.
pub struct Bridge<L, S> {
    link: L,
    sink: S,
    registry: TypeRegistry,
    accumulator: StreamAccumulator,
    config: BridgeConfig,
    read_buf: Vec<u8>,
}

impl<L: SerialLink, S: ReadingSink> Bridge<L, S> {
    /// Create a bridge with default configuration.
    pub fn new(link: L, registry: TypeRegistry, sink: S) -> Self {
        Self::with_config(link, registry, sink, BridgeConfig::default())
    }

    /// Create a bridge with explicit configuration.
    pub fn with_config(link: L, registry: TypeRegistry, sink: S, config: BridgeConfig) -> Self {
        Self {
            link,
            sink,
            registry,
            accumulator: StreamAccumulator::with_config(config.stream.clone()),
            read_buf: vec![0u8; config.read_chunk],
            config,
        }
    }

    /// Read one chunk from the link and run it through the accumulator.
    ///
    /// Every structurally sound frame is returned, checksum flag intact.
    /// Checksum-valid frames are additionally published to the sink as
    /// readings; bad candidates and bad checksums are logged and skipped.
    pub fn poll(&mut self) -> Result<Vec<DecodedFrame>> {
        let read = self.link.read_available(&mut self.read_buf)?;
        if read == 0 {
            return Ok(Vec::new());
        }

        let mut frames = Vec::new();
        for result in self.accumulator.feed(&self.read_buf[..read]) {
            match result {
                Ok(frame) => {
                    if frame.checksum_ok {
                        let reading = Reading::from_frame(&frame);
                        debug!(
                            type_id = frame.type_id,
                            raw = reading.raw,
                            "frame decoded, publishing reading"
                        );
                        self.sink.publish(&reading);
                    } else {
                        warn!(
                            message_id = frame.message_id,
                            type_id = frame.type_id,
                            "checksum mismatch, reading suppressed"
                        );
                    }
                    frames.push(frame);
                }
                Err(err) => {
                    warn!(%err, "discarding undecodable candidate");
                }
            }
        }
        Ok(frames)
    }

    /// Encode a command frame and write it to the link.
    ///
    /// Fails with [`HubError::UnknownMessageType`] if the catalog has no
    /// entry for `type_id`, and with a `Closed` transport error if the
    /// link is down. No retries here; retry policy belongs to the caller.
    pub fn send(&mut self, message_id: u8, type_id: u8, payload: &[u8]) -> Result<()> {
        if !self.registry.contains(type_id) {
            return Err(HubError::UnknownMessageType(type_id));
        }
        if !self.link.is_open() {
            return Err(HubError::Transport(TransportError::Closed));
        }

        let mut wire = BytesMut::new();
        encode_frame(message_id, type_id, payload, &mut wire)?;
        self.link.write_all(&wire)?;
        debug!(message_id, type_id, bytes = wire.len(), "command frame sent");
        Ok(())
    }

    /// Whether the underlying link is open.
    pub fn is_open(&self) -> bool {
        self.link.is_open()
    }

    /// Bytes buffered waiting for a frame terminator.
    pub fn pending(&self) -> usize {
        self.accumulator.pending()
    }

    /// The message type catalog this bridge resolves against.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Current bridge configuration.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Borrow the underlying link.
    pub fn link(&self) -> &L {
        &self.link
    }

    /// Consume the bridge and return the underlying link.
    pub fn into_link(self) -> L {
        self.link
    }
}
