use crate::fast_tier::MemoryTier;
use async_trait::async_trait;
use hopper_core::{Mapping, Repository, ShortCode, Shortener, ShortenerError, StorageError};
use hopper_generator::Generator;
use std::sync::Arc;
use tracing::{debug, error, info, trace, warn};
use typed_builder::TypedBuilder;

pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Tunables for [`MappingStore`].
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct StoreSettings {
    /// How many freshly generated codes `shorten` tries before giving up.
    /// Values below 1 are treated as 1.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,
}

/// The two-tier mapping store.
///
/// - `shorten` reserves a fresh code in the fast tier, then persists it. If
///   the durable insert fails the reservation is released again, so the
///   fast tier never holds a mapping the durable tier refused.
/// - `resolve` answers from the fast tier when it can. Misses go to the
///   durable tier and hits are promoted into memory.
///
/// No lock is held while the durable tier is called.
///
/// A reservation is visible to `resolve` before the durable insert commits.
/// If a fresh code happens to match one persisted before a restart, a
/// concurrent `resolve` of that code can briefly return the new, uncommitted
/// URL. The window closes when the durable `Conflict` releases the
/// reservation and the create retries with another code.
pub struct MappingStore<R, G> {
    fast: MemoryTier,
    durable: Arc<R>,
    generator: Arc<G>,
    settings: StoreSettings,
}

impl<R: Repository, G: Generator> MappingStore<R, G> {
    pub fn new(durable: R, generator: G) -> Self {
        Self::with_settings(durable, generator, StoreSettings::builder().build())
    }

    pub fn with_settings(durable: R, generator: G, settings: StoreSettings) -> Self {
        Self {
            fast: MemoryTier::new(),
            durable: Arc::new(durable),
            generator: Arc::new(generator),
            settings: StoreSettings {
                max_attempts: settings.max_attempts.max(1),
            },
        }
    }

    pub fn fast_tier(&self) -> &MemoryTier {
        &self.fast
    }

    pub fn durable(&self) -> &R {
        &self.durable
    }

    fn validate_url(url: &str) -> Result<(), ShortenerError> {
        if url.is_empty() {
            return Err(ShortenerError::Validation(
                "URL cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl<R: Repository, G: Generator> Shortener for MappingStore<R, G> {
    async fn shorten(&self, url: &str) -> Result<ShortCode, ShortenerError> {
        Self::validate_url(url)?;

        for attempt in 1..=self.settings.max_attempts {
            let code: ShortCode = self.generator.generate().into();

            if !self.fast.reserve(&code, url) {
                warn!(code = %code, attempt, "generated code is already in memory, retrying");
                continue;
            }

            match self.durable.insert(&Mapping::new(code.clone(), url)).await {
                Ok(()) => {
                    info!(code = %code, url, "created mapping");
                    return Ok(code);
                }
                Err(StorageError::Conflict(_)) => {
                    self.fast.release(&code, url);
                    warn!(code = %code, attempt, "generated code is already persisted, retrying");
                }
                Err(source) => {
                    self.fast.release(&code, url);
                    error!(
                        operation = "insert",
                        code = %code,
                        error = %source,
                        "failed to persist mapping"
                    );
                    return Err(ShortenerError::DurableWrite {
                        code: code.into_string(),
                        source,
                    });
                }
            }
        }

        Err(ShortenerError::CodeSpaceExhausted {
            attempts: self.settings.max_attempts,
        })
    }

    async fn resolve(&self, code: &ShortCode) -> Result<String, ShortenerError> {
        if let Some(url) = self.fast.get(code) {
            debug!(code = %code, "fast tier hit");
            return Ok(url);
        }

        trace!(code = %code, "fast tier miss, querying durable tier");
        match self.durable.get(code).await {
            Ok(Some(mapping)) => {
                debug!(code = %code, "durable tier hit, promoting into fast tier");
                Ok(self.fast.promote(code, mapping.url))
            }
            Ok(None) => {
                debug!(code = %code, "short code not found");
                Err(ShortenerError::NotFound(code.to_string()))
            }
            Err(e) => {
                // Lookup failures are reported to the caller as plain misses.
                error!(operation = "find", code = %code, error = %e, "durable lookup failed");
                Err(ShortenerError::NotFound(code.to_string()))
            }
        }
    }

    fn list(&self) -> Vec<Mapping> {
        self.fast.snapshot()
    }
}
