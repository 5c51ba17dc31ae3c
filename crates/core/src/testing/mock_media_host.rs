//! Mock media host for testing.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::media_host::{MediaHost, MediaHostError, SearchPage, SearchRequest};

/// Mock implementation of the [`MediaHost`] trait.
///
/// Provides controllable behavior for testing:
/// - Return scripted search pages in order
/// - Record every search request for assertions
/// - Simulate failures
#[derive(Debug, Default)]
pub struct MockMediaHost {
    /// Pages returned by successive searches.
    pages: RwLock<VecDeque<SearchPage>>,
    /// Recorded requests.
    requests: RwLock<Vec<SearchRequest>>,
    /// If set, the next search will fail with this error.
    next_error: RwLock<Option<MediaHostError>>,
}

impl MockMediaHost {
    /// Create a new mock with no scripted pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a page for the next search.
    pub async fn push_page(&self, page: SearchPage) {
        self.pages.write().await.push_back(page);
    }

    /// Make the next search fail.
    pub async fn fail_next(&self, error: MediaHostError) {
        *self.next_error.write().await = Some(error);
    }

    /// All recorded search requests.
    pub async fn requests(&self) -> Vec<SearchRequest> {
        self.requests.read().await.clone()
    }

    /// Number of searches run.
    pub async fn search_count(&self) -> usize {
        self.requests.read().await.len()
    }
}

#[async_trait]
impl MediaHost for MockMediaHost {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, MediaHostError> {
        self.requests.write().await.push(request.clone());

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        Ok(self.pages.write().await.pop_front().unwrap_or_default())
    }

    fn delivery_url(&self, public_id: &str, transforms: Option<&str>) -> String {
        match transforms {
            Some(t) => format!("https://mock.test/image/upload/{}/{}", t, public_id),
            None => format!("https://mock.test/image/upload/{}", public_id),
        }
    }
}
