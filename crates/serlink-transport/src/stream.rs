use std::io::{ErrorKind, Read, Write};

use tracing::debug;

use crate::error::{Result, TransportError};
use crate::traits::SerialLink;

/// Adapts any `Read + Write` byte stream into a [`SerialLink`].
///
/// This is how a real device is attached: open the tty as a file and wrap
/// the handle. EOF from the underlying stream marks the link closed: the
/// call that hits EOF still returns `Ok(0)` so callers can finish draining,
/// and every call after that fails with [`TransportError::Closed`].
pub struct StreamLink<T> {
    inner: T,
    open: bool,
}

impl<T: Read + Write> StreamLink<T> {
    pub fn new(inner: T) -> Self {
        Self { inner, open: true }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the link and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read + Write> SerialLink for StreamLink<T> {
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize> {
        if !self.open {
            return Err(TransportError::Closed);
        }
        match self.inner.read(buf) {
            Ok(0) => {
                debug!("stream reached end of input, marking link closed");
                self.open = false;
                Ok(0)
            }
            Ok(n) => Ok(n),
            Err(err)
                if matches!(
                    err.kind(),
                    ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted
                ) =>
            {
                Ok(0)
            }
            Err(err) => {
                self.open = false;
                Err(TransportError::Io(err))
            }
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        if !self.open {
            return Err(TransportError::Closed);
        }

        let mut offset = 0usize;
        while offset < bytes.len() {
            match self.inner.write(&bytes[offset..]) {
                Ok(0) => {
                    self.open = false;
                    return Err(TransportError::Closed);
                }
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => {
                    self.open = false;
                    return Err(TransportError::Io(err));
                }
            }
        }

        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => {
                    self.open = false;
                    return Err(TransportError::Io(err));
                }
            }
        }
    }

    fn is_open(&self) -> bool {
        self.open
    }
}
