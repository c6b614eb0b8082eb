use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The document identifier was never part of the indexed corpus.
    #[error("document not found: {0}")]
    DocumentNotFound(String),
    #[error("top_k must be at least 1, got {0}")]
    InvalidTopK(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
