/// Errors that can occur while loading the message type catalog.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The catalog document could not be loaded.
    #[error("failed to load message types: {0}")]
    LoadFailed(String),

    /// The catalog document is not valid JSON.
    #[error("message type document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two entries declared the same wire id.
    #[error("duplicate message type id {0}")]
    DuplicateId(u8),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
