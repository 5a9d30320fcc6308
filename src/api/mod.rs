//! API Module
//!
//! HTTP handlers and routing for the social graph REST API.
//!
//! # Endpoints
//! - `POST /api/v1/users`, `GET /api/v1/users` - Provision and list users
//! - `GET /api/v1/users/:id` - Fetch one user
//! - `POST|DELETE /api/v1/users/:id/follow` - Follow / unfollow as `X-User-ID`
//! - `GET /api/v1/users/following`, `GET /api/v1/users/followers`
//! - `POST /api/v1/tweets` - Create a content item as `X-User-ID`
//! - `GET /api/v1/tweets/following` - Content by authors, paginated
//! - `GET /api/v1/timeline` - Timeline of `X-User-ID`
//! - `GET /stats`, `GET /health`

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
