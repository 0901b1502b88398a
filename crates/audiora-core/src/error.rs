use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid session type: {0}")]
    InvalidSessionKind(String),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("patient age {0} is outside 0-120")]
    InvalidAge(u32),

    #[error("invalid uuid: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
