//! Client Module
//!
//! HTTP clients for a remote follow-graph service and a remote content
//! service, so the timeline can run as its own process.
//!
//! Transport errors and non-success statuses become
//! [`ServiceError::Downstream`](crate::error::ServiceError::Downstream).

mod content;
mod graph;

use std::time::Duration;

pub use content::HttpContentClient;
pub use graph::HttpGraphClient;

/// Shared reqwest client with a per-request timeout.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().timeout(timeout).build()
}
