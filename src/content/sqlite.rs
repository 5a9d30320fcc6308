//! SQLite-backed content store.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::content::{ContentStore, Page};
use crate::error::{Result, StoreError};
use crate::models::ContentItem;

type ContentRow = (String, String, String, i64);

/// Durable content items. `created_at` is stored as microseconds since epoch.
#[derive(Debug, Clone)]
pub struct SqliteContentStore {
    pool: SqlitePool,
}

impl SqliteContentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Stores a new item authored now.
    pub async fn create(&self, author_id: &str, body: &str) -> std::result::Result<ContentItem, StoreError> {
        let item = ContentItem {
            id: Uuid::new_v4().to_string(),
            author_id: author_id.to_string(),
            body: body.to_string(),
            // Storage keeps microseconds; truncate so the returned item matches reads
            created_at: Utc::now().trunc_subsecs(6),
        };
        self.insert(&item).await?;
        Ok(item)
    }

    /// Stores `item` as given.
    pub async fn insert(&self, item: &ContentItem) -> std::result::Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO content_items (id, author_id, body, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&item.id)
        .bind(&item.author_id)
        .bind(&item.body)
        .bind(item.created_at.timestamp_micros())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn query_page(
        &self,
        authors: &BTreeSet<&str>,
        page: Page,
    ) -> std::result::Result<Vec<ContentItem>, StoreError> {
        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT id, author_id, body, created_at FROM content_items WHERE author_id IN (",
        );
        let mut separated = query.separated(", ");
        for author in authors {
            separated.push_bind(*author);
        }
        separated.push_unseparated(") ORDER BY created_at DESC, id DESC LIMIT ");
        query.push_bind(page.limit());
        query.push(" OFFSET ");
        query.push_bind(page.offset());

        let rows = query
            .build_query_as::<ContentRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(into_item).collect()
    }
}

fn into_item((id, author_id, body, micros): ContentRow) -> std::result::Result<ContentItem, StoreError> {
    let created_at = DateTime::<Utc>::from_timestamp_micros(micros)
        .ok_or_else(|| StoreError::CorruptRow(format!("content item {} has bad timestamp", id)))?;
    Ok(ContentItem {
        id,
        author_id,
        body,
        created_at,
    })
}

#[async_trait]
impl ContentStore for SqliteContentStore {
    async fn get_by_authors(&self, author_ids: &[String], page: Page) -> Result<Vec<ContentItem>> {
        let authors: BTreeSet<&str> = author_ids.iter().map(String::as_str).collect();
        if authors.is_empty() {
            return Ok(Vec::new());
        }

        let items = self.query_page(&authors, page).await?;
        debug!(
            authors = authors.len(),
            page = page.number(),
            page_size = page.size(),
            items = items.len(),
            "content page fetched"
        );
        Ok(items)
    }
}
