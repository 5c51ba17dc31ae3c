//! Mock page source for testing the pagination driver.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::pagination::{ImagePage, PageError, PageSource};

/// Scripted [`PageSource`].
///
/// Each fetch pops the next scripted response. Fetching with an empty script
/// returns an empty, final page.
#[derive(Debug, Default)]
pub struct MockPageSource {
    responses: Mutex<VecDeque<Result<ImagePage, PageError>>>,
    cursors: Mutex<Vec<Option<String>>>,
}

impl MockPageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful page.
    pub async fn push_page(&self, page: ImagePage) {
        self.responses.lock().await.push_back(Ok(page));
    }

    /// Queue a failure.
    pub async fn push_error(&self, error: PageError) {
        self.responses.lock().await.push_back(Err(error));
    }

    /// Cursors passed to each fetch, in order.
    pub async fn requested_cursors(&self) -> Vec<Option<String>> {
        self.cursors.lock().await.clone()
    }
}

#[async_trait]
impl PageSource for MockPageSource {
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<ImagePage, PageError> {
        self.cursors.lock().await.push(cursor.map(str::to_string));
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(ImagePage::default()))
    }
}
