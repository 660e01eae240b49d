/// Errors that can occur in bridge operations.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// Transport-level error.
    #[error("transport error: {0}")]
    Transport(#[from] serlink_transport::TransportError),

    /// Frame-level error on the send path.
    #[error("frame error: {0}")]
    Frame(#[from] serlink_frame::FrameError),

    /// An encode request referenced a type id absent from the catalog.
    #[error("unknown message type id {0}")]
    UnknownMessageType(u8),
}

pub type Result<T> = std::result::Result<T, HubError>;
