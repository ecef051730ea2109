//! Contract entity extraction behind one capability interface.
//!
//! Two interchangeable strategies produce the same [`EntityBundle`] shape:
//! a regex [`PatternExtractor`] with no model dependency, and a candle-based
//! [`ModelExtractor`] running BERT token classification. The caller picks a
//! strategy at construction time and never branches on its identity again.

mod labels;
mod model;
mod pattern;

pub use labels::{normalize_label, EntityCategory};
pub use model::{ModelExtractor, NerConfig, NerModel, NerSpan};
pub use pattern::PatternExtractor;

use clauselens_common::{ClauseLensError, EntityBundle};

pub type Result<T> = std::result::Result<T, NerError>;

#[derive(Debug, thiserror::Error)]
pub enum NerError {
    #[error("Model loading failed: {0}")]
    ModelLoad(String),

    #[error("Tokenization failed: {0}")]
    Tokenization(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Download failed: {0}")]
    Download(String),
}

impl From<candle_core::Error> for NerError {
    fn from(e: candle_core::Error) -> Self {
        NerError::Inference(e.to_string())
    }
}

impl From<std::io::Error> for NerError {
    fn from(e: std::io::Error) -> Self {
        NerError::Download(e.to_string())
    }
}

impl From<NerError> for ClauseLensError {
    fn from(e: NerError) -> Self {
        ClauseLensError::Extraction(e.to_string())
    }
}

/// The strategy interface: one normalized document in, one entity bundle
/// out. An `Ok` bundle with empty fields means the extractor ran and found
/// nothing, which is distinct from an `Err` (it could not run at all).
pub trait EntityExtractor: Send + Sync {
    fn extract_entities(&self, text: &str) -> Result<EntityBundle>;
}
