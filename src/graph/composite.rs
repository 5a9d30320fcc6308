//! Composite Graph Repository
//!
//! Cache-aside repository over a [`PersistentGraphStore`] and a [`CacheLayer`].
//!
//! Reads try the cache first and fall back to the store, writing the result
//! back best-effort. Mutations go to the store first and only then invalidate
//! the affected cache entries. Cache failures never fail a call; store
//! failures always do.

use std::sync::Arc;

use crate::cache::{CacheKey, CacheLayer, SetKind};
use crate::error::{Result, ServiceError};
use crate::graph::PersistentGraphStore;
use crate::models::{require_id, User};
use crate::observe::{Event, EventSink};

/// Follow-graph repository binding the durable store and the cache.
#[derive(Clone)]
pub struct CompositeGraphRepository {
    persistent: Arc<dyn PersistentGraphStore>,
    cache: Arc<dyn CacheLayer>,
    sink: Arc<dyn EventSink>,
}

impl CompositeGraphRepository {
    pub fn new(
        persistent: Arc<dyn PersistentGraphStore>,
        cache: Arc<dyn CacheLayer>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            persistent,
            cache,
            sink,
        }
    }

    // == Follow ==
    /// Records that `follower_id` follows `followed_id`.
    ///
    /// Idempotent. On a store failure nothing is invalidated and the error
    /// is returned as-is.
    pub async fn follow(&self, follower_id: &str, followed_id: &str) -> Result<()> {
        let follower_id = require_id("follower_id", follower_id)?;
        let followed_id = require_id("followed_id", followed_id)?;

        self.persistent.follow(follower_id, followed_id).await?;
        self.invalidate_edge(follower_id, followed_id).await;
        Ok(())
    }

    // == Unfollow ==
    /// Removes the edge. Removing a missing edge is not an error.
    pub async fn unfollow(&self, follower_id: &str, followed_id: &str) -> Result<()> {
        let follower_id = require_id("follower_id", follower_id)?;
        let followed_id = require_id("followed_id", followed_id)?;

        self.persistent.unfollow(follower_id, followed_id).await?;
        self.invalidate_edge(follower_id, followed_id).await;
        Ok(())
    }

    // == Get Following ==
    /// Users `user_id` follows, in no particular order.
    pub async fn get_following(&self, user_id: &str) -> Result<Vec<User>> {
        self.cached_set(SetKind::Following, user_id).await
    }

    // == Get Followers ==
    /// Users following `user_id`, in no particular order.
    pub async fn get_followers(&self, user_id: &str) -> Result<Vec<User>> {
        self.cached_set(SetKind::Followers, user_id).await
    }

    // == Get User ==
    pub async fn get_user(&self, id: &str) -> Result<User> {
        let id = require_id("user_id", id)?;
        let key = CacheKey::User(id.to_string());

        match self.cache.get_user(id).await {
            Ok(Some(user)) => {
                self.sink.record(Event::CacheHit { key, entries: 1 });
                return Ok(user);
            }
            Ok(None) => self.sink.record(Event::CacheMiss { key: key.clone() }),
            Err(err) => self.sink.record(Event::CacheReadFailed {
                key: key.clone(),
                error: err.to_string(),
            }),
        }

        let user = self
            .persistent
            .get_user(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User '{}' not found", id)))?;

        match self.cache.set_user(&user).await {
            Ok(()) => self.sink.record(Event::CacheFilled { key, entries: 1 }),
            Err(err) => self.sink.record(Event::CacheFillFailed {
                key,
                error: err.to_string(),
            }),
        }

        Ok(user)
    }

    // == Provisioning ==
    /// Creates a user. Not cached: the first `get_user` fills the entry.
    pub async fn create_user(&self, username: &str) -> Result<User> {
        let username = require_id("username", username)?;
        Ok(self.persistent.create_user(username).await?)
    }

    /// All users, straight from the store.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.persistent.list_users().await?)
    }

    async fn cached_set(&self, kind: SetKind, user_id: &str) -> Result<Vec<User>> {
        let user_id = require_id("user_id", user_id)?;
        let key = CacheKey::set(kind, user_id);

        match self.cache.get_set(kind, user_id).await {
            Ok(Some(users)) => {
                self.sink.record(Event::CacheHit {
                    key,
                    entries: users.len(),
                });
                return Ok(users);
            }
            Ok(None) => self.sink.record(Event::CacheMiss { key: key.clone() }),
            Err(err) => self.sink.record(Event::CacheReadFailed {
                key: key.clone(),
                error: err.to_string(),
            }),
        }

        let users = match kind {
            SetKind::Following => self.persistent.following(user_id).await?,
            SetKind::Followers => self.persistent.followers(user_id).await?,
        };

        match self.cache.set_set(kind, user_id, &users).await {
            Ok(()) => self.sink.record(Event::CacheFilled {
                key,
                entries: users.len(),
            }),
            Err(err) => self.sink.record(Event::CacheFillFailed {
                key,
                error: err.to_string(),
            }),
        }

        Ok(users)
    }

    /// Drops both cached views an edge appears in.
    async fn invalidate_edge(&self, follower_id: &str, followed_id: &str) {
        self.invalidate(CacheKey::Following(follower_id.to_string()))
            .await;
        self.invalidate(CacheKey::Followers(followed_id.to_string()))
            .await;
    }

    async fn invalidate(&self, key: CacheKey) {
        match self.cache.delete(&key).await {
            Ok(()) => self.sink.record(Event::Invalidated { key }),
            Err(err) => self.sink.record(Event::InvalidationFailed {
                key,
                error: err.to_string(),
            }),
        }
    }
}
