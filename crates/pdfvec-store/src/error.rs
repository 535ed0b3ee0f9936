use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Embedding encoding failed: {0}")]
    Embedding(#[from] pdfvec_core::error::Error),

    #[error("commit_interval must be at least 1")]
    InvalidCommitInterval,

    #[error("{0} buffered records were never committed")]
    Uncommitted(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
