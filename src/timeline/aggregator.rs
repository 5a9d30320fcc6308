//! Timeline Aggregator
//!
//! Composes one page of content authored by the users someone follows.

use std::sync::Arc;

use tracing::debug;

use crate::content::{ContentStore, Page};
use crate::error::Result;
use crate::models::{require_id, Timeline};
use crate::observe::{Event, EventSink};
use crate::timeline::FollowingSource;

/// Builds timelines from a follow graph and a content store.
///
/// The two lookups run one after the other within the caller's future;
/// dropping that future abandons whichever call is in flight.
#[derive(Clone)]
pub struct TimelineAggregator {
    graph: Arc<dyn FollowingSource>,
    content: Arc<dyn ContentStore>,
    sink: Arc<dyn EventSink>,
    page_size: u32,
}

impl TimelineAggregator {
    pub fn new(
        graph: Arc<dyn FollowingSource>,
        content: Arc<dyn ContentStore>,
        sink: Arc<dyn EventSink>,
        page_size: u32,
    ) -> Self {
        Self {
            graph,
            content,
            sink,
            page_size,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Newest-first content by everyone `user_id` follows, first page only.
    ///
    /// A failure in either lookup fails the whole call.
    pub async fn get_timeline(&self, user_id: &str) -> Result<Timeline> {
        let user_id = require_id("user_id", user_id)?;

        let following = self.graph.following(user_id).await?;
        if following.is_empty() {
            self.sink.record(Event::TimelineShortCircuited {
                user_id: user_id.to_string(),
            });
            return Ok(Timeline::empty());
        }

        let author_ids: Vec<String> = following.into_iter().map(|user| user.id).collect();
        debug!(%user_id, authors = author_ids.len(), "fetching timeline content");

        let items = self
            .content
            .get_by_authors(&author_ids, Page::first(self.page_size))
            .await?;

        self.sink.record(Event::TimelineAssembled {
            user_id: user_id.to_string(),
            authors: author_ids.len(),
            items: items.len(),
        });
        Ok(Timeline { items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::models::{ContentItem, User};
    use crate::observe::RecordingSink;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    // == Test Doubles ==
    struct FixedGraph {
        result: Mutex<Option<Result<Vec<User>>>>,
    }

    impl FixedGraph {
        fn following(ids: &[&str]) -> Arc<Self> {
            let users = ids.iter().map(|id| User::new(*id, *id)).collect();
            Arc::new(Self {
                result: Mutex::new(Some(Ok(users))),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                result: Mutex::new(Some(Err(ServiceError::Downstream(
                    "user service unavailable".into(),
                )))),
            })
        }
    }

    #[async_trait]
    impl FollowingSource for FixedGraph {
        async fn following(&self, _user_id: &str) -> Result<Vec<User>> {
            self.result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    /// In-memory content with a call counter.
    #[derive(Default)]
    struct CountingContent {
        items: Vec<ContentItem>,
        calls: AtomicUsize,
        last_page: Mutex<Option<Page>>,
        fail: bool,
    }

    impl CountingContent {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ContentStore for CountingContent {
        async fn get_by_authors(&self, author_ids: &[String], page: Page) -> Result<Vec<ContentItem>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_page.lock().unwrap() = Some(page);
            if self.fail {
                return Err(ServiceError::Downstream("tweet service unavailable".into()));
            }
            let mut items: Vec<ContentItem> = self
                .items
                .iter()
                .filter(|item| author_ids.contains(&item.author_id))
                .cloned()
                .collect();
            items.sort_by(|a, b| (b.created_at, &b.id).cmp(&(a.created_at, &a.id)));
            Ok(items)
        }
    }

    fn item(id: &str, author: &str, minute: u32) -> ContentItem {
        ContentItem {
            id: id.to_string(),
            author_id: author.to_string(),
            body: id.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 6, 7, 10, minute, 0).unwrap(),
        }
    }

    fn aggregator(
        graph: Arc<FixedGraph>,
        content: Arc<CountingContent>,
        sink: Arc<RecordingSink>,
    ) -> TimelineAggregator {
        TimelineAggregator::new(graph, content, sink, 20)
    }

    #[tokio::test]
    async fn test_timeline_merges_followed_authors_newest_first() {
        let content = Arc::new(CountingContent {
            items: vec![
                item("t1", "B", 0),
                item("t2", "B", 5),
                item("t3", "C", 2),
                item("t4", "D", 9),
            ],
            ..CountingContent::default()
        });
        let sink = Arc::new(RecordingSink::new());
        let timeline = aggregator(FixedGraph::following(&["B", "C"]), content.clone(), sink.clone())
            .get_timeline("A")
            .await
            .unwrap();

        let ids: Vec<&str> = timeline.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["t2", "t3", "t1"]);
        assert_eq!(*content.last_page.lock().unwrap(), Some(Page::first(20)));
        assert_eq!(
            sink.count(|e| matches!(e, Event::TimelineAssembled { authors: 2, items: 3, .. })),
            1
        );
    }

    #[tokio::test]
    async fn test_following_nobody_skips_content() {
        let content = Arc::new(CountingContent::default());
        let sink = Arc::new(RecordingSink::new());

        let timeline = aggregator(FixedGraph::following(&[]), content.clone(), sink.clone())
            .get_timeline("A")
            .await
            .unwrap();

        assert!(timeline.is_empty());
        assert_eq!(content.calls(), 0);
        assert_eq!(
            sink.count(|e| matches!(e, Event::TimelineShortCircuited { .. })),
            1
        );
    }

    #[tokio::test]
    async fn test_graph_failure_aborts() {
        let content = Arc::new(CountingContent::default());
        let result = aggregator(FixedGraph::failing(), content.clone(), Arc::new(RecordingSink::new()))
            .get_timeline("A")
            .await;

        assert!(matches!(result, Err(ServiceError::Downstream(msg)) if msg.contains("user service")));
        assert_eq!(content.calls(), 0);
    }

    #[tokio::test]
    async fn test_content_failure_aborts() {
        let content = Arc::new(CountingContent {
            fail: true,
            ..CountingContent::default()
        });
        let result = aggregator(FixedGraph::following(&["B"]), content, Arc::new(RecordingSink::new()))
            .get_timeline("A")
            .await;

        assert!(matches!(result, Err(ServiceError::Downstream(_))));
    }

    #[tokio::test]
    async fn test_followed_users_without_content() {
        let content = Arc::new(CountingContent::default());
        let timeline = aggregator(FixedGraph::following(&["B"]), content.clone(), Arc::new(RecordingSink::new()))
            .get_timeline("A")
            .await
            .unwrap();

        assert!(timeline.is_empty());
        assert_eq!(content.calls(), 1);
    }

    #[tokio::test]
    async fn test_blank_user_rejected() {
        let content = Arc::new(CountingContent::default());
        let result = aggregator(FixedGraph::following(&["B"]), content.clone(), Arc::new(RecordingSink::new()))
            .get_timeline(" ")
            .await;

        assert!(matches!(result, Err(ServiceError::InvalidRequest(_))));
        assert_eq!(content.calls(), 0);
    }
}
