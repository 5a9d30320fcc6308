//! Cache Entry Module
//!
//! Defines cache keys and the two shapes a cached value can take.

use std::collections::HashSet;
use std::fmt;

// == Set Kind ==
/// Direction of a cached follow set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetKind {
    /// Users the owner follows
    Following,
    /// Users following the owner
    Followers,
}

impl SetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SetKind::Following => "following",
            SetKind::Followers => "followers",
        }
    }
}

// == Cache Key ==
/// Namespaced key of a cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    User(String),
    Following(String),
    Followers(String),
}

impl CacheKey {
    /// Key of the `kind` set owned by `user_id`.
    pub fn set(kind: SetKind, user_id: impl Into<String>) -> Self {
        match kind {
            SetKind::Following => CacheKey::Following(user_id.into()),
            SetKind::Followers => CacheKey::Followers(user_id.into()),
        }
    }

    /// The user this entry belongs to.
    pub fn user_id(&self) -> &str {
        match self {
            CacheKey::User(id) | CacheKey::Following(id) | CacheKey::Followers(id) => id,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::User(id) => write!(f, "user:{}", id),
            CacheKey::Following(id) => write!(f, "following:{}", id),
            CacheKey::Followers(id) => write!(f, "followers:{}", id),
        }
    }
}

// == Cache Entry ==
/// A cached value: one serialized snapshot, or a set of serialized members.
///
/// An empty `Set` is a real answer ("follows nobody"), unlike an absent key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEntry {
    Single(String),
    Set(HashSet<String>),
}

impl CacheEntry {
    /// Number of snapshots held.
    pub fn len(&self) -> usize {
        match self {
            CacheEntry::Single(_) => 1,
            CacheEntry::Set(members) => members.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
