//! Request DTOs for the social graph API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

/// Minimum accepted username length in characters
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum accepted username length in characters
pub const MAX_USERNAME_LENGTH: usize = 50;

/// Request body for POST /api/v1/users
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    /// Desired unique username
    pub username: String,
}

impl CreateUserRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        let length = self.username.trim().chars().count();
        if length == 0 {
            return Some("Username cannot be empty".to_string());
        }
        if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&length) {
            return Some(format!(
                "Username must be between {} and {} characters",
                MIN_USERNAME_LENGTH, MAX_USERNAME_LENGTH
            ));
        }
        None
    }
}

/// Request body for POST /api/v1/tweets
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContentRequest {
    /// Text of the item
    pub body: String,
}

impl CreateContentRequest {
    /// Validates the request data
    pub fn validate(&self) -> Option<String> {
        if self.body.trim().is_empty() {
            return Some("Body cannot be empty".to_string());
        }
        None
    }
}

/// Query string for GET /api/v1/tweets/following
///
/// `user_ids` is a comma separated list. Page values are signed so that
/// out-of-range input reaches the coercion policy instead of being rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentQuery {
    #[serde(default)]
    pub user_ids: Option<String>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
}

impl ContentQuery {
    /// Splits `user_ids`, dropping blanks.
    pub fn author_ids(&self) -> Vec<String> {
        self.user_ids
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }
}
