use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::{Result, TransportError};
use crate::traits::SerialLink;

struct Shared {
    inbound: VecDeque<u8>,
    outbound: Vec<u8>,
    open: bool,
}

/// In-memory serial link. The host side of a [`pair`].
pub struct LoopbackLink {
    shared: Arc<Mutex<Shared>>,
}

/// The device side of a [`pair`]: injects inbound bytes and inspects what
/// the host wrote.
pub struct LoopbackDevice {
    shared: Arc<Mutex<Shared>>,
}

fn lock(shared: &Mutex<Shared>) -> std::sync::MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Create a connected loopback link/device pair.
pub fn pair() -> (LoopbackLink, LoopbackDevice) {
    let shared = Arc::new(Mutex::new(Shared {
        inbound: VecDeque::new(),
        outbound: Vec::new(),
        open: true,
    }));
    (
        LoopbackLink {
            shared: Arc::clone(&shared),
        },
        LoopbackDevice { shared },
    )
}

impl LoopbackDevice {
    /// Queue bytes for the host to read.
    pub fn inject(&self, bytes: &[u8]) {
        let mut shared = lock(&self.shared);
        shared.inbound.extend(bytes.iter().copied());
    }

    /// Everything the host has written so far.
    pub fn written(&self) -> Vec<u8> {
        lock(&self.shared).outbound.clone()
    }

    /// Drop the connection; further host I/O fails with `Closed`.
    pub fn close(&self) {
        let mut shared = lock(&self.shared);
        shared.open = false;
        debug!("loopback device closed");
    }
}

impl SerialLink for LoopbackLink {
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut shared = lock(&self.shared);
        if !shared.open {
            return Err(TransportError::Closed);
        }
        let mut n = 0;
        while n < buf.len() {
            match shared.inbound.pop_front() {
                Some(byte) => {
                    buf[n] = byte;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        let mut shared = lock(&self.shared);
        if !shared.open {
            return Err(TransportError::Closed);
        }
        shared.outbound.extend_from_slice(bytes);
        Ok(())
    }

    fn is_open(&self) -> bool {
        lock(&self.shared).open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injected_bytes_come_back_in_order() {
        let (mut link, device) = pair();
        device.inject(b"hello");

        let mut buf = [0u8; 3];
        assert_eq!(link.read_available(&mut buf).unwrap(), 3);
        assert_eq!(&buf, b"hel");

        let mut rest = [0u8; 8];
        let n = link.read_available(&mut rest).unwrap();
        assert_eq!(&rest[..n], b"lo");
    }

    #[test]
    fn empty_queue_reads_zero() {
        let (mut link, _device) = pair();
        let mut buf = [0u8; 4];
        assert_eq!(link.read_available(&mut buf).unwrap(), 0);
    }

    #[test]
    fn writes_are_visible_to_device() {
        let (mut link, device) = pair();
        link.write_all(b"set 1").unwrap();
        link.write_all(b"\n").unwrap();
        assert_eq!(device.written(), b"set 1\n");
    }

    #[test]
    fn close_fails_subsequent_io() {
        let (mut link, device) = pair();
        device.close();

        assert!(!link.is_open());
        let mut buf = [0u8; 1];
        assert!(matches!(
            link.read_available(&mut buf),
            Err(TransportError::Closed)
        ));
        assert!(matches!(
            link.write_all(b"x"),
            Err(TransportError::Closed)
        ));
    }
}
