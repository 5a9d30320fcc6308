//! Remote content client.

use async_trait::async_trait;
use tracing::debug;

use crate::content::{ContentStore, Page};
use crate::error::{Result, ServiceError};
use crate::models::ContentItem;

/// Reads `GET {base_url}/tweets/following?user_ids=..&page=..&page_size=..`.
///
/// `base_url` points at the API root, e.g. `http://content:3000/api/v1`.
#[derive(Debug, Clone)]
pub struct HttpContentClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpContentClient {
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl ContentStore for HttpContentClient {
    async fn get_by_authors(&self, author_ids: &[String], page: Page) -> Result<Vec<ContentItem>> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/tweets/following", self.base_url);
        debug!(%url, authors = author_ids.len(), page = page.number(), "requesting content");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("user_ids", author_ids.join(",")),
                ("page", page.number().to_string()),
                ("page_size", page.size().to_string()),
            ])
            .send()
            .await
            .map_err(|e| ServiceError::Downstream(format!("content request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Downstream(format!(
                "content service returned {}",
                status
            )));
        }

        response
            .json::<Vec<ContentItem>>()
            .await
            .map_err(|e| ServiceError::Downstream(format!("content response unreadable: {}", e)))
    }
}
