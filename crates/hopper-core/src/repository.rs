use crate::error::StorageError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A `(code, url)` pair, the unit of storage.
///
/// Mappings are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub code: ShortCode,
    /// The original URL that was shortened.
    pub url: String,
}

impl Mapping {
    pub fn new(code: ShortCode, url: impl Into<String>) -> Self {
        Self {
            code,
            url: url.into(),
        }
    }
}

/// A read-only view of the durable tier.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the mapping for a given short code.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<Mapping>>;
}

/// The durable tier consumed by the mapping store.
#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new mapping. Returns `Err(Conflict)` if the code already exists.
    async fn insert(&self, mapping: &Mapping) -> Result<()>;
}
