//! Cache Store Module
//!
//! In-process key/value engine behind [`MemoryCache`](super::MemoryCache).

use std::collections::HashMap;

use crate::cache::{CacheCounters, CacheEntry, CacheKey, CacheStats};

// == Cache Store ==
/// HashMap storage of cache entries plus hit/miss accounting.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<CacheKey, CacheEntry>,
    /// Hit/miss/fill/invalidation counters
    counters: CacheCounters,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    // == Set ==
    /// Stores an entry, replacing whatever the key held before.
    pub fn set(&mut self, key: CacheKey, entry: CacheEntry) {
        self.entries.insert(key, entry);
        self.counters.record_fill();
    }

    // == Get ==
    /// Retrieves an entry by key, recording a hit or a miss.
    ///
    /// Takes `&self`, so concurrent lookups only need shared access.
    pub fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        match self.entries.get(key) {
            Some(entry) => {
                self.counters.record_hit();
                Some(entry.clone())
            }
            None => {
                self.counters.record_miss();
                None
            }
        }
    }

    // == Delete ==
    /// Removes an entry. Returns whether the key was present.
    pub fn delete(&mut self, key: &CacheKey) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.counters.record_invalidation();
        }
        removed
    }

    /// True if the key is present. Does not touch statistics.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn single(value: &str) -> CacheEntry {
        CacheEntry::Single(value.to_string())
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new();
        let key = CacheKey::User("1".into());

        store.set(key.clone(), single("alice"));

        assert_eq!(store.get(&key), Some(single("alice")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_absent() {
        let store = CacheStore::new();
        assert!(store.get(&CacheKey::Following("1".into())).is_none());
    }

    #[test]
    fn test_store_empty_set_is_present() {
        let mut store = CacheStore::new();
        let key = CacheKey::Following("1".into());

        store.set(key.clone(), CacheEntry::Set(HashSet::new()));

        assert_eq!(store.get(&key), Some(CacheEntry::Set(HashSet::new())));
    }

    #[test]
    fn test_store_delete() {
        let mut store = CacheStore::new();
        let key = CacheKey::User("1".into());

        store.set(key.clone(), single("alice"));
        assert!(store.delete(&key));

        assert!(store.is_empty());
        assert!(store.get(&key).is_none());
    }

    #[test]
    fn test_store_delete_absent() {
        let mut store = CacheStore::new();
        assert!(!store.delete(&CacheKey::User("nobody".into())));
        assert_eq!(store.stats().invalidations, 0);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new();
        let key = CacheKey::User("1".into());

        store.set(key.clone(), single("alice"));
        store.set(key.clone(), single("alicia"));

        assert_eq!(store.get(&key), Some(single("alicia")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_keys_are_namespaced() {
        let mut store = CacheStore::new();
        store.set(CacheKey::Following("1".into()), CacheEntry::Set(HashSet::new()));

        assert!(!store.contains(&CacheKey::Followers("1".into())));
        assert!(!store.contains(&CacheKey::User("1".into())));
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new();
        let key = CacheKey::User("1".into());

        store.set(key.clone(), single("alice"));
        store.get(&key); // hit
        store.get(&CacheKey::User("2".into())); // miss
        store.delete(&key);

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.fills, 1);
        assert_eq!(stats.invalidations, 1);
        assert_eq!(stats.total_entries, 0);
    }
}
