use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClauseLensError {
    #[error("Entity extraction error: {0}")]
    Extraction(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Pipeline error: {0}")]
    Pipeline(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ClauseLensError>;
