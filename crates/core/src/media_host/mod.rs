//! Boundary to the hosted media library the badge photographs live in.
//!
//! The gallery only ever reads: one search call per page, filtered to the
//! configured folder and sorted newest first.

mod cloudinary;
mod types;

pub use cloudinary::CloudinaryClient;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to the media host.
#[derive(Debug, Error)]
pub enum MediaHostError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("Media host request timed out")]
    Timeout,

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing or rejected credentials).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Read access to the media library.
#[async_trait]
pub trait MediaHost: Send + Sync {
    /// Run one page of a resource search.
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, MediaHostError>;

    /// Public delivery URL for a resource, optionally with a transformation
    /// string such as `c_fill,w_400`.
    fn delivery_url(&self, public_id: &str, transforms: Option<&str>) -> String;
}
