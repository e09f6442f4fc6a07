use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use hopper_core::{Mapping, ShortCode};

/// The volatile fast tier: `code -> url`, lost on restart.
///
/// Every operation locks only the shard that owns the key, so callers never
/// hold a lock across a durable-tier call.
#[derive(Debug, Default)]
pub struct MemoryTier {
    entries: DashMap<ShortCode, String>,
}

impl MemoryTier {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn get(&self, code: &ShortCode) -> Option<String> {
        self.entries.get(code).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, code: &ShortCode) -> bool {
        self.entries.contains_key(code)
    }

    /// Claims `code` for `url` if no entry exists yet.
    ///
    /// Returns `false` and leaves the tier untouched when the code is taken.
    pub fn reserve(&self, code: &ShortCode, url: &str) -> bool {
        match self.entries.entry(code.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(url.to_owned());
                true
            }
        }
    }

    /// Undoes a [`reserve`](Self::reserve).
    ///
    /// The entry is removed only while it still maps to `url`.
    pub fn release(&self, code: &ShortCode, url: &str) -> bool {
        self.entries
            .remove_if(code, |_, resident| resident == url)
            .is_some()
    }

    /// Copies a durable-tier hit into memory and returns the resident URL.
    ///
    /// An entry that is already present wins.
    pub fn promote(&self, code: &ShortCode, url: String) -> String {
        self.entries
            .entry(code.clone())
            .or_insert(url)
            .value()
            .clone()
    }

    /// A point-in-time copy of every entry, ordered by code.
    pub fn snapshot(&self) -> Vec<Mapping> {
        let mut mappings: Vec<Mapping> = self
            .entries
            .iter()
            .map(|entry| Mapping::new(entry.key().clone(), entry.value().clone()))
            .collect();
        mappings.sort_by(|a, b| a.code.cmp(&b.code));
        mappings
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    #[test]
    fn reserve_vacant_slot() {
        let tier = MemoryTier::new();

        assert!(tier.reserve(&code("abc123"), "https://example.com"));
        assert_eq!(tier.get(&code("abc123")).as_deref(), Some("https://example.com"));
    }

    #[test]
    fn reserve_occupied_slot_keeps_original() {
        let tier = MemoryTier::new();
        tier.reserve(&code("abc123"), "https://first.example");

        assert!(!tier.reserve(&code("abc123"), "https://second.example"));
        assert_eq!(tier.get(&code("abc123")).as_deref(), Some("https://first.example"));
    }

    #[test]
    fn release_removes_matching_entry() {
        let tier = MemoryTier::new();
        tier.reserve(&code("abc123"), "https://example.com");

        assert!(tier.release(&code("abc123"), "https://example.com"));
        assert!(!tier.contains(&code("abc123")));
    }

    #[test]
    fn release_ignores_foreign_entry() {
        let tier = MemoryTier::new();
        tier.reserve(&code("abc123"), "https://owner.example");

        assert!(!tier.release(&code("abc123"), "https://someone-else.example"));
        assert_eq!(tier.get(&code("abc123")).as_deref(), Some("https://owner.example"));
    }

    #[test]
    fn promote_fills_empty_slot() {
        let tier = MemoryTier::new();

        let resident = tier.promote(&code("abc123"), "https://example.com".to_string());
        assert_eq!(resident, "https://example.com");
        assert!(tier.contains(&code("abc123")));
    }

    #[test]
    fn promote_does_not_overwrite() {
        let tier = MemoryTier::new();
        tier.reserve(&code("abc123"), "https://resident.example");

        let resident = tier.promote(&code("abc123"), "https://durable.example".to_string());
        assert_eq!(resident, "https://resident.example");
    }

    #[test]
    fn snapshot_is_sorted_by_code() {
        let tier = MemoryTier::new();
        tier.reserve(&code("ccc"), "https://c.example");
        tier.reserve(&code("aaa"), "https://a.example");
        tier.reserve(&code("bbb"), "https://b.example");

        let codes: Vec<_> = tier
            .snapshot()
            .into_iter()
            .map(|m| m.code.into_string())
            .collect();
        assert_eq!(codes, ["aaa", "bbb", "ccc"]);
        assert_eq!(tier.len(), 3);
    }
}
