//! Content Module
//!
//! Content items (tweets) and the "authored by any of these users" query
//! the timeline fans out to.

mod sqlite;


use async_trait::async_trait;

use crate::error::Result;
use crate::models::ContentItem;

pub use sqlite::SqliteContentStore;

// == Public Constants ==
/// Page used when the caller asks for page < 1
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the caller asks for a size < 1
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// == Page ==
/// A 1-based page request. Out-of-range input is coerced, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    size: u32,
}

impl Page {
    /// Coerces `page < 1` to 1 and `page_size < 1` to 10.
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            number: coerce(page, DEFAULT_PAGE),
            size: coerce(page_size, DEFAULT_PAGE_SIZE),
        }
    }

    /// Missing values take the defaults.
    pub fn from_query(page: Option<i64>, page_size: Option<i64>) -> Self {
        Self::new(page.unwrap_or(0), page_size.unwrap_or(0))
    }

    /// First page of `size` items.
    pub fn first(size: u32) -> Self {
        Self::new(1, i64::from(size))
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Rows to skip. Saturates at `i64::MAX`, which simply yields an empty page.
    pub fn offset(&self) -> i64 {
        (i64::from(self.number) - 1).saturating_mul(i64::from(self.size))
    }

    /// Rows to return.
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1, i64::from(DEFAULT_PAGE_SIZE))
    }
}

fn coerce(value: i64, default: u32) -> u32 {
    if value < 1 {
        default
    } else {
        u32::try_from(value).unwrap_or(u32::MAX)
    }
}

// == Content Store Trait ==
/// Read side of the content store.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Items whose author is in `author_ids`, ordered by `created_at`
    /// descending, ties broken by id descending.
    ///
    /// An empty `author_ids` yields an empty page without querying anything.
    async fn get_by_authors(&self, author_ids: &[String], page: Page) -> Result<Vec<ContentItem>>;
}
