//! Serial link abstraction.
//!
//! The protocol stack never opens a device itself; it consumes the
//! [`SerialLink`] boundary defined here. Two implementations ship with the
//! crate:
//! - [`StreamLink`] adapts anything `Read + Write` (a tty opened as a file,
//!   a socket, a pty)
//! - [`LoopbackLink`] is an in-memory pair for tests and demos
//!
//! This is the lowest layer of serlink. Everything else builds on top of it.

pub mod error;
pub mod loopback;
pub mod stream;
pub mod traits;

pub use error::{Result, TransportError};
pub use loopback::{pair, LoopbackDevice, LoopbackLink};
pub use stream::StreamLink;
pub use traits::SerialLink;
