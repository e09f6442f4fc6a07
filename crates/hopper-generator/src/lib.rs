pub mod error;
pub mod random;

pub use error::GeneratorError;
pub use random::{RandomGenerator, RandomGeneratorSettings, DEFAULT_LENGTH};

use hopper_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// They are not required to produce unique codes; the mapping store
/// retries on collision.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;

    /// Generates a type that can be converted into a short code.
    fn generate(&self) -> Self::Output;
}
