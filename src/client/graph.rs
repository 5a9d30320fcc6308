//! Remote follow-graph client.

use async_trait::async_trait;
use tracing::debug;

use crate::api::USER_ID_HEADER;
use crate::error::{Result, ServiceError};
use crate::models::{FollowingResponse, User};
use crate::timeline::FollowingSource;

/// Reads `GET {base_url}/following` with the acting user in `X-User-ID`.
///
/// `base_url` points at the users collection, e.g. `http://graph:3000/api/v1/users`.
#[derive(Debug, Clone)]
pub struct HttpGraphClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGraphClient {
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl FollowingSource for HttpGraphClient {
    async fn following(&self, user_id: &str) -> Result<Vec<User>> {
        let url = format!("{}/following", self.base_url);
        debug!(%url, %user_id, "requesting following users");

        let response = self
            .client
            .get(&url)
            .header(USER_ID_HEADER, user_id)
            .send()
            .await
            .map_err(|e| ServiceError::Downstream(format!("graph request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Downstream(format!(
                "graph service returned {}",
                status
            )));
        }

        let body: FollowingResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Downstream(format!("graph response unreadable: {}", e)))?;
        Ok(body.following)
    }
}
