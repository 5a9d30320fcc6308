//! Observability Module
//!
//! Structured events emitted by the graph repository and the timeline
//! aggregator. Components receive an [`EventSink`] explicitly at construction.

use std::sync::Mutex;

use tracing::{debug, info, warn};

use crate::cache::CacheKey;

// == Events ==
/// Something worth telling an operator about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Cached value served without touching the durable store
    CacheHit { key: CacheKey, entries: usize },
    /// Key absent from the cache
    CacheMiss { key: CacheKey },
    /// Cache read failed; treated as a miss
    CacheReadFailed { key: CacheKey, error: String },
    /// Durable result written back into the cache
    CacheFilled { key: CacheKey, entries: usize },
    /// Write-back failed; the caller still got its answer
    CacheFillFailed { key: CacheKey, error: String },
    /// Entry removed after a durable mutation
    Invalidated { key: CacheKey },
    /// Removal after a durable mutation failed; the entry may be stale
    InvalidationFailed { key: CacheKey, error: String },
    /// Requesting user follows nobody; content was not queried
    TimelineShortCircuited { user_id: String },
    /// Timeline composed from `authors` followed users
    TimelineAssembled {
        user_id: String,
        authors: usize,
        items: usize,
    },
}

// == Sink Trait ==
/// Receiver of [`Event`]s.
pub trait EventSink: Send + Sync {
    fn record(&self, event: Event);
}

// == Tracing Sink ==
/// Production sink forwarding events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: Event) {
        match event {
            Event::CacheHit { key, entries } => {
                debug!(cache_key = %key, entries, "cache hit");
            }
            Event::CacheMiss { key } => {
                debug!(cache_key = %key, "cache miss");
            }
            Event::CacheReadFailed { key, error } => {
                warn!(cache_key = %key, %error, "cache read failed, falling back to store");
            }
            Event::CacheFilled { key, entries } => {
                debug!(cache_key = %key, entries, "cache filled");
            }
            Event::CacheFillFailed { key, error } => {
                warn!(cache_key = %key, %error, "cache fill failed");
            }
            Event::Invalidated { key } => {
                debug!(cache_key = %key, "cache entry invalidated");
            }
            Event::InvalidationFailed { key, error } => {
                warn!(cache_key = %key, %error, "cache invalidation failed, entry may be stale");
            }
            Event::TimelineShortCircuited { user_id } => {
                info!(%user_id, "user follows nobody, returning empty timeline");
            }
            Event::TimelineAssembled {
                user_id,
                authors,
                items,
            } => {
                info!(%user_id, authors, items, "timeline assembled");
            }
        }
    }
}

// == Recording Sink ==
/// Sink that keeps every event in memory. Used by tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Event>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Counts recorded events matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&Event) -> bool) -> usize {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn record(&self, event: Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
