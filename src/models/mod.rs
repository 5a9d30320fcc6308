//! Domain types and request/response models
//!
//! `domain` holds the values the graph, content and timeline components pass
//! around; `requests`/`responses` are the HTTP DTOs.

pub mod domain;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use domain::{require_id, ContentItem, Timeline, User};
pub use requests::{ContentQuery, CreateContentRequest, CreateUserRequest};
pub use responses::{
    FollowersResponse, FollowingResponse, HealthResponse, MessageResponse, StatsResponse,
    UserResponse, UsersResponse,
};
