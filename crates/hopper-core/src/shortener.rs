use crate::repository::Mapping;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Creates a mapping for `url` and returns the generated short code.
    async fn shorten(&self, url: &str) -> Result<ShortCode>;

    /// Resolves a short code to its original URL.
    ///
    /// Returns `Err(NotFound)` if the code is unknown or the lookup failed.
    async fn resolve(&self, code: &ShortCode) -> Result<String>;

    /// Returns the mappings currently held in memory, ordered by code.
    fn list(&self) -> Vec<Mapping>;
}
