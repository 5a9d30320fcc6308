//! Cache Module
//!
//! Best-effort mirror of graph query results: single user snapshots under
//! `user:<id>` and follow sets under `following:<id>` / `followers:<id>`.
//! Entries never expire; they live until invalidated.

mod entry;
mod layer;
mod stats;
mod store;


// Re-export public types
pub use entry::{CacheEntry, CacheKey, SetKind};
pub use layer::{CacheLayer, MemoryCache};
pub use stats::{CacheCounters, CacheStats};
pub use store::CacheStore;
