use super::extension::Extension;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Snapshot serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot contains no blocks")]
    EmptyDocument,

    #[error("Command requires the {0:?} extension, which is not enabled")]
    Unsupported(Extension),

    #[error("Invalid heading level: {0}")]
    InvalidHeadingLevel(u8),
}

pub type EngineResult<T> = Result<T, EngineError>;
