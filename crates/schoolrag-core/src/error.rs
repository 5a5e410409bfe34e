use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Retriever not initialized")]
    Uninitialized,

    #[error("Malformed corpus: entry {index} is missing `{field}`")]
    MalformedCorpus { index: usize, field: &'static str },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corpus JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
