use thiserror::Error;

/// Errors produced by indexing, storage, search and crawling.
#[derive(Error, Debug)]
pub enum Error {
    /// Retrieving a remote resource failed. Fatal to the crawl in progress.
    #[error("failed to fetch {resource}: {reason}")]
    Fetch { resource: String, reason: String },

    /// A write collided with an existing primary key.
    #[error("duplicate primary key: {0}")]
    DuplicateKey(String),

    /// A storage lookup failed, e.g. the word index is missing.
    #[error("query failed: {0}")]
    Query(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("document not found: {0}")]
    NotFound(String),

    #[error("invalid document id {0:?}: must be non-empty and free of the id separator")]
    InvalidDocumentId(String),

    #[error("storage error: {0}")]
    Storage(#[from] sled::Error),

    #[error("encoding error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn fetch(resource: impl Into<String>, reason: impl ToString) -> Self {
        Error::Fetch { resource: resource.into(), reason: reason.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
