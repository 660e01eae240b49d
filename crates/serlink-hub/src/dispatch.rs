use std::sync::mpsc::{channel, Receiver, Sender};

use tracing::debug;

use crate::reading::Reading;

/// Fan-out boundary for derived readings.
///
/// Delivery is fire-and-forget: the bridge never waits for confirmation
/// and never retries. Implementations own their failure policy.
pub trait ReadingSink {
    fn publish(&self, reading: &Reading);
}

/// Discards every reading. Useful when only the command path is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ReadingSink for NullSink {
    fn publish(&self, _reading: &Reading) {}
}

/// Hands readings to an in-process channel.
///
/// The receiving half is whatever broadcast mechanism the application
/// runs (a websocket pump, a log writer). A reading published after the
/// receiver is gone is dropped.
pub struct ChannelSink {
    tx: Sender<Reading>,
}

impl ChannelSink {
    /// Create a sink and the receiver it feeds.
    pub fn new() -> (Self, Receiver<Reading>) {
        let (tx, rx) = channel();
        (Self { tx }, rx)
    }
}

impl ReadingSink for ChannelSink {
    fn publish(&self, reading: &Reading) {
        if self.tx.send(reading.clone()).is_err() {
            debug!("reading receiver gone, dropping");
        }
    }
}
