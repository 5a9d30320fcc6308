//! API Routes
//!
//! Configures the Axum router with all endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::handlers::{
    content_by_authors_handler, create_content_handler, create_user_handler, follow_handler,
    followers_handler, following_handler, get_user_handler, health_handler, list_users_handler,
    stats_handler, timeline_handler, unfollow_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Timeout: Drops the handler future once `state.request_timeout` elapses
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let timeout = TimeoutLayer::new(state.request_timeout);

    Router::new()
        .route("/api/v1/users", post(create_user_handler).get(list_users_handler))
        .route("/api/v1/users/following", get(following_handler))
        .route("/api/v1/users/followers", get(followers_handler))
        .route("/api/v1/users/:id", get(get_user_handler))
        .route(
            "/api/v1/users/:id/follow",
            post(follow_handler).delete(unfollow_handler),
        )
        .route("/api/v1/tweets", post(create_content_handler))
        .route("/api/v1/tweets/following", get(content_by_authors_handler))
        .route("/api/v1/timeline", get(timeline_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(timeout)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
