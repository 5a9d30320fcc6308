//! Graph Module
//!
//! Follow-graph storage. [`SqliteGraphStore`] is the source of truth;
//! [`CompositeGraphRepository`] puts the cache in front of it.

mod composite;
mod sqlite;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::User;

pub use composite::CompositeGraphRepository;
pub use sqlite::SqliteGraphStore;

// == Persistent Store Trait ==
/// Durable CRUD over users and follow edges.
///
/// No pagination: graph fan-out is read in one round trip.
#[async_trait]
pub trait PersistentGraphStore: Send + Sync {
    /// Inserts the edge. Inserting an existing edge is a no-op.
    async fn follow(&self, follower_id: &str, followed_id: &str) -> Result<(), StoreError>;

    /// Deletes the edge. Deleting a missing edge is a no-op.
    async fn unfollow(&self, follower_id: &str, followed_id: &str) -> Result<(), StoreError>;

    /// Users `u` with an edge `(user_id, u.id)`.
    async fn following(&self, user_id: &str) -> Result<Vec<User>, StoreError>;

    /// Users `u` with an edge `(u.id, user_id)`.
    async fn followers(&self, user_id: &str) -> Result<Vec<User>, StoreError>;

    async fn get_user(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// Provisions a user with a generated id.
    async fn create_user(&self, username: &str) -> Result<User, StoreError>;

    async fn list_users(&self) -> Result<Vec<User>, StoreError>;
}
