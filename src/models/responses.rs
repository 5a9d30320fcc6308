//! Response DTOs for the social graph API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::{Deserialize, Serialize};

use crate::cache::CacheStats;
use crate::models::User;

/// Response body for a single user (POST /api/v1/users, GET /api/v1/users/:id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: User,
}

/// Response body for GET /api/v1/users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

/// Response body for GET /api/v1/users/following
///
/// Also the payload the remote graph client decodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowingResponse {
    pub following: Vec<User>,
}

/// Response body for GET /api/v1/users/followers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowersResponse {
    pub followers: Vec<User>,
}

/// Response body for follow/unfollow
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// Success message
    pub message: String,
}

impl MessageResponse {
    pub fn followed(followed_id: &str) -> Self {
        Self {
            message: format!("Now following '{}'", followed_id),
        }
    }

    pub fn unfollowed(followed_id: &str) -> Self {
        Self {
            message: format!("No longer following '{}'", followed_id),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    /// Entries written after falling back to the durable store
    pub fills: u64,
    pub invalidations: u64,
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            fills: stats.fills,
            invalidations: stats.invalidations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
