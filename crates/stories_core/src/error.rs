use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The serialized action named a kind the reducer does not handle.
    #[error("unknown action kind: {0}")]
    UnknownAction(String),
    #[error("malformed action: {0}")]
    MalformedAction(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store serialization error: {0}")]
    Serialize(String),
}
