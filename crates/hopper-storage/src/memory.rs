use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use hopper_core::repository::{Mapping, ReadRepository, Repository, Result};
use hopper_core::{ShortCode, StorageError};

/// In-memory implementation of the durable-tier contract using DashMap.
///
/// Nothing survives a restart. Used for local runs and as the backing
/// store in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    storage: DashMap<String, String>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<Mapping>> {
        Ok(self
            .storage
            .get(code.as_str())
            .map(|url| Mapping::new(code.clone(), url.value().clone())))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, mapping: &Mapping) -> Result<()> {
        match self.storage.entry(mapping.code.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(mapping.code.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(mapping.url.clone());
                Ok(())
            }
        }
    }
}
