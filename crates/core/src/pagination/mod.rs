//! Client-side pagination over the gallery API.
//!
//! A [`PaginationDriver`] pulls one page at a time from a [`PageSource`] and
//! folds it into its [`CatalogIndex`](crate::catalog::CatalogIndex).

mod api_client;
mod driver;

pub use api_client::GalleryApiClient;
pub use driver::{LoadOutcome, PageRequest, PaginationDriver, PaginationPhase};

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::media_host::RawRecord;

/// One page as served by `GET /api/images`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImagePage {
    pub images: Vec<RawRecord>,
    /// `null` once there are no further pages.
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Errors fetching a page.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Parse(String),
}

/// Anything that can serve pages of raw image records by cursor.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page after `cursor`, or the first page when `None`.
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<ImagePage, PageError>;
}

#[async_trait]
impl<T: PageSource + ?Sized> PageSource for Arc<T> {
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<ImagePage, PageError> {
        (**self).fetch_page(cursor).await
    }
}
