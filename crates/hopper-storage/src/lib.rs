//! Durable-tier backends for the Hopper mapping store.

pub mod memory;
pub mod mysql;

pub use hopper_core::repository::{Mapping, ReadRepository, Repository, Result};
pub use hopper_core::StorageError;
pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
