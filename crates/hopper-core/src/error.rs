use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

/// Errors reported by durable storage backends.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("short code already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

/// Errors surfaced to callers of the mapping store.
#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    /// The caller supplied an unusable URL. Nothing was written.
    #[error("invalid url: {0}")]
    Validation(String),
    /// The durable tier rejected the insert for `code`.
    #[error("failed to persist mapping for {code}: {source}")]
    DurableWrite {
        code: String,
        #[source]
        source: StorageError,
    },
    /// The code is in neither tier, or the durable lookup failed.
    #[error("short code not found: {0}")]
    NotFound(String),
    #[error("no free short code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },
}
