//! Message type catalog for the serlink wire protocol.
//!
//! Frames carry a one-byte type id; this crate maps those ids to the
//! metadata that gives them meaning (name, declared data type,
//! description). The catalog is loaded once at startup from a JSON
//! document and treated as read-only afterwards.
//!
//! The protocol layer itself never consults the catalog. Resolution
//! happens at the edges, on the send path and in diagnostics.

pub mod config;
pub mod error;
pub mod registry;

pub use config::RegistryConfig;
pub use error::{RegistryError, Result};
pub use registry::{MessageType, TypeRegistry};
