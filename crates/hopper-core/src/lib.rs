//! Core types and traits for the Hopper URL shortener.
//!
//! This crate provides the types shared by the generator, the durable
//! storage backends, the mapping store and the HTTP gateway.

pub mod error;
pub mod repository;
pub mod shortcode;
pub mod shortener;

pub use error::{CoreError, ShortenerError, StorageError};
pub use repository::{Mapping, ReadRepository, Repository};
pub use shortcode::ShortCode;
pub use shortener::Shortener;
