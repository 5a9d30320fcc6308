//! API Handlers
//!
//! HTTP request handlers for the graph, content and timeline endpoints.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path, Query, State},
    http::{request::Parts, StatusCode},
    Json,
};
use sqlx::SqlitePool;
use tracing::info;

use crate::cache::MemoryCache;
use crate::client::{build_http_client, HttpContentClient, HttpGraphClient};
use crate::config::Config;
use crate::content::{ContentStore, Page, SqliteContentStore};
use crate::db;
use crate::error::{Result, ServiceError};
use crate::graph::{CompositeGraphRepository, SqliteGraphStore};
use crate::models::{
    ContentItem, ContentQuery, CreateContentRequest, CreateUserRequest, FollowersResponse,
    FollowingResponse, HealthResponse, MessageResponse, StatsResponse, Timeline, UserResponse,
    UsersResponse,
};
use crate::observe::{EventSink, TracingSink};
use crate::timeline::{FollowingSource, TimelineAggregator};

/// Header carrying the acting user's identifier
pub const USER_ID_HEADER: &str = "x-user-id";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-aside follow-graph repository
    pub graph: Arc<CompositeGraphRepository>,
    /// Local content store
    pub content: Arc<SqliteContentStore>,
    /// Timeline fan-out, local or against remote collaborators
    pub timeline: Arc<TimelineAggregator>,
    /// The cache behind `graph`, kept for statistics
    pub cache: MemoryCache,
    /// Deadline applied to every request
    pub request_timeout: Duration,
}

impl AppState {
    /// Wires every component on top of an open pool.
    ///
    /// The timeline reads through HTTP clients when the corresponding
    /// service URLs are configured, and through the local components otherwise.
    pub fn new(pool: SqlitePool, config: &Config, sink: Arc<dyn EventSink>) -> anyhow::Result<Self> {
        let cache = MemoryCache::new();
        let graph = Arc::new(CompositeGraphRepository::new(
            Arc::new(SqliteGraphStore::new(pool.clone())),
            Arc::new(cache.clone()),
            sink.clone(),
        ));
        let content = Arc::new(SqliteContentStore::new(pool));

        let http = if config.graph_service_url.is_some() || config.content_service_url.is_some() {
            Some(build_http_client(Duration::from_secs(
                config.downstream_timeout,
            ))?)
        } else {
            None
        };

        let following: Arc<dyn FollowingSource> = match (&config.graph_service_url, &http) {
            (Some(url), Some(client)) => {
                info!(%url, "Timeline reads the follow graph remotely");
                Arc::new(HttpGraphClient::new(url.as_str(), client.clone()))
            }
            _ => graph.clone(),
        };
        let source: Arc<dyn ContentStore> = match (&config.content_service_url, &http) {
            (Some(url), Some(client)) => {
                info!(%url, "Timeline reads content remotely");
                Arc::new(HttpContentClient::new(url.as_str(), client.clone()))
            }
            _ => content.clone(),
        };

        let timeline = Arc::new(TimelineAggregator::new(
            following,
            source,
            sink,
            config.timeline_page_size,
        ));

        Ok(Self {
            graph,
            content,
            timeline,
            cache,
            request_timeout: Duration::from_secs(config.request_timeout),
        })
    }

    /// Opens the configured database and wires the state with a tracing sink.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let pool = db::connect(config).await?;
        Self::new(pool, config, Arc::new(TracingSink))
    }
}

// == Acting User Extractor ==
/// Identifier from the `X-User-ID` header. Missing or blank is rejected.
#[derive(Debug, Clone)]
pub struct ActingUser(pub String);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ActingUser {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| ActingUser(value.to_string()))
            .ok_or(ServiceError::MissingIdentity)
    }
}

/// Handler for POST /api/v1/users
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    if let Some(error_msg) = req.validate() {
        return Err(ServiceError::InvalidRequest(error_msg));
    }

    let user = state.graph.create_user(&req.username).await?;
    info!(user_id = %user.id, username = %user.username, "User created");
    Ok((StatusCode::CREATED, Json(UserResponse { user })))
}

/// Handler for GET /api/v1/users
pub async fn list_users_handler(State(state): State<AppState>) -> Result<Json<UsersResponse>> {
    let users = state.graph.list_users().await?;
    Ok(Json(UsersResponse { users }))
}

/// Handler for GET /api/v1/users/:id
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>> {
    let user = state.graph.get_user(&id).await?;
    Ok(Json(UserResponse { user }))
}

/// Handler for POST /api/v1/users/:followed_id/follow
pub async fn follow_handler(
    State(state): State<AppState>,
    ActingUser(follower_id): ActingUser,
    Path(followed_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.graph.follow(&follower_id, &followed_id).await?;
    info!(%follower_id, %followed_id, "Follow recorded");
    Ok(Json(MessageResponse::followed(&followed_id)))
}

/// Handler for DELETE /api/v1/users/:followed_id/follow
pub async fn unfollow_handler(
    State(state): State<AppState>,
    ActingUser(follower_id): ActingUser,
    Path(followed_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.graph.unfollow(&follower_id, &followed_id).await?;
    info!(%follower_id, %followed_id, "Follow removed");
    Ok(Json(MessageResponse::unfollowed(&followed_id)))
}

/// Handler for GET /api/v1/users/following
pub async fn following_handler(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
) -> Result<Json<FollowingResponse>> {
    let following = state.graph.get_following(&user_id).await?;
    Ok(Json(FollowingResponse { following }))
}

/// Handler for GET /api/v1/users/followers
pub async fn followers_handler(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
) -> Result<Json<FollowersResponse>> {
    let followers = state.graph.get_followers(&user_id).await?;
    Ok(Json(FollowersResponse { followers }))
}

/// Handler for POST /api/v1/tweets
///
/// The acting user is the author.
pub async fn create_content_handler(
    State(state): State<AppState>,
    ActingUser(author_id): ActingUser,
    Json(req): Json<CreateContentRequest>,
) -> Result<(StatusCode, Json<ContentItem>)> {
    if let Some(error_msg) = req.validate() {
        return Err(ServiceError::InvalidRequest(error_msg));
    }

    let item = state.content.create(&author_id, &req.body).await?;
    info!(item_id = %item.id, %author_id, "Content item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// Handler for GET /api/v1/tweets/following
pub async fn content_by_authors_handler(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<Vec<ContentItem>>> {
    let page = Page::from_query(query.page, query.page_size);
    let items = state
        .content
        .get_by_authors(&query.author_ids(), page)
        .await?;
    Ok(Json(items))
}

/// Handler for GET /api/v1/timeline
pub async fn timeline_handler(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
) -> Result<Json<Timeline>> {
    let timeline = state.timeline.get_timeline(&user_id).await?;
    info!(%user_id, items = timeline.len(), "Timeline served");
    Ok(Json(timeline))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
