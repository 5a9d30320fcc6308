//! Cache Layer Module
//!
//! The capability the graph repository consumes from a cache, and the
//! in-process implementation backed by [`CacheStore`].

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheEntry, CacheKey, CacheStats, CacheStore, SetKind};
use crate::error::CacheError;
use crate::models::User;

// == Cache Layer Trait ==
/// Get/set/delete for single user snapshots and for follow sets.
///
/// `Ok(None)` means the key is absent. A present but empty set is returned
/// as `Ok(Some(vec![]))`.
#[async_trait]
pub trait CacheLayer: Send + Sync {
    async fn get_user(&self, id: &str) -> Result<Option<User>, CacheError>;

    async fn set_user(&self, user: &User) -> Result<(), CacheError>;

    async fn get_set(&self, kind: SetKind, user_id: &str) -> Result<Option<Vec<User>>, CacheError>;

    /// Replaces the whole set.
    async fn set_set(&self, kind: SetKind, user_id: &str, members: &[User])
        -> Result<(), CacheError>;

    /// Removes any entry under `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &CacheKey) -> Result<(), CacheError>;
}

// == Memory Cache ==
/// Thread-safe in-process cache.
///
/// Set members are stored as individual JSON snapshots.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    store: Arc<RwLock<CacheStore>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current hit/miss/invalidation counters.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    /// True if `key` is cached. Does not count as a lookup.
    pub async fn contains(&self, key: &CacheKey) -> bool {
        self.store.read().await.contains(key)
    }
}

#[async_trait]
impl CacheLayer for MemoryCache {
    async fn get_user(&self, id: &str) -> Result<Option<User>, CacheError> {
        let key = CacheKey::User(id.to_string());
        let entry = self.store.read().await.get(&key);

        match entry {
            None => Ok(None),
            Some(CacheEntry::Single(raw)) => Ok(Some(serde_json::from_str(&raw)?)),
            Some(CacheEntry::Set(_)) => Err(CacheError::Unavailable(format!(
                "unexpected set stored under {}",
                key
            ))),
        }
    }

    async fn set_user(&self, user: &User) -> Result<(), CacheError> {
        let raw = serde_json::to_string(user)?;
        self.store
            .write()
            .await
            .set(CacheKey::User(user.id.clone()), CacheEntry::Single(raw));
        Ok(())
    }

    async fn get_set(&self, kind: SetKind, user_id: &str) -> Result<Option<Vec<User>>, CacheError> {
        let key = CacheKey::set(kind, user_id);
        let entry = self.store.read().await.get(&key);

        match entry {
            None => Ok(None),
            Some(CacheEntry::Set(members)) => {
                let users = members
                    .iter()
                    .map(|raw| serde_json::from_str(raw))
                    .collect::<Result<Vec<User>, _>>()?;
                Ok(Some(users))
            }
            Some(CacheEntry::Single(_)) => Err(CacheError::Unavailable(format!(
                "unexpected snapshot stored under {}",
                key
            ))),
        }
    }

    async fn set_set(
        &self,
        kind: SetKind,
        user_id: &str,
        members: &[User],
    ) -> Result<(), CacheError> {
        let serialized = members
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<HashSet<String>, _>>()?;

        self.store
            .write()
            .await
            .set(CacheKey::set(kind, user_id), CacheEntry::Set(serialized));
        Ok(())
    }

    async fn delete(&self, key: &CacheKey) -> Result<(), CacheError> {
        self.store.write().await.delete(key);
        Ok(())
    }
}
