/// Errors that can occur on a serial link.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The link is not open for I/O.
    #[error("serial link closed")]
    Closed,

    /// An I/O error occurred on the underlying device.
    #[error("serial I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;
