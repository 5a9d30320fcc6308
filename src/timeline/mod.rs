//! Timeline Module
//!
//! Read-path fan-out: follow graph first, then content by the followed ids.

mod aggregator;

use async_trait::async_trait;

use crate::error::Result;
use crate::graph::CompositeGraphRepository;
use crate::models::User;

pub use aggregator::TimelineAggregator;

// == Following Source ==
/// Where the aggregator learns whom a user follows.
#[async_trait]
pub trait FollowingSource: Send + Sync {
    async fn following(&self, user_id: &str) -> Result<Vec<User>>;
}

#[async_trait]
impl FollowingSource for CompositeGraphRepository {
    async fn following(&self, user_id: &str) -> Result<Vec<User>> {
        self.get_following(user_id).await
    }
}
