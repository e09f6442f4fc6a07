//! The two-tier mapping store.
//!
//! [`MappingStore`] keeps every mapping in an in-memory fast tier and a
//! durable [`Repository`](hopper_core::Repository), generating codes with
//! any [`Generator`](hopper_generator::Generator). It implements the
//! [`Shortener`](hopper_core::Shortener) trait consumed by the gateway.

pub mod fast_tier;
pub mod store;

pub use fast_tier::MemoryTier;
pub use store::{MappingStore, StoreSettings, DEFAULT_MAX_ATTEMPTS};
