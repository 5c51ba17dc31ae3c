//! HTTP page source for the gallery's own `/api/images` route.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{ImagePage, PageError, PageSource};

/// Fetches pages from a running gallery server.
pub struct GalleryApiClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl GalleryApiClient {
    /// Create a client for the server at `base_url` (e.g. `http://127.0.0.1:8080`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PageError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn map_send_error(e: reqwest::Error) -> PageError {
        if e.is_timeout() {
            PageError::Timeout
        } else {
            PageError::Http(e)
        }
    }
}

#[async_trait]
impl PageSource for GalleryApiClient {
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<ImagePage, PageError> {
        let url = format!("{}/api/images", self.base_url);

        let mut query: Vec<(&str, String)> = Vec::with_capacity(2);
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor.to_string()));
        }
        // Cache-buster so intermediaries never serve a stale page.
        query.push(("_t", Utc::now().timestamp_millis().to_string()));

        debug!(cursor = ?cursor, "Fetching gallery page");

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            warn!(status = status.as_u16(), error = %message, "Gallery API error");
            return Err(PageError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await.map_err(Self::map_send_error)?;
        serde_json::from_slice(&bytes).map_err(|e| PageError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_silent_server_times_out() {
        // Accepts connections but never writes a response.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let client =
            GalleryApiClient::new(format!("http://{}", addr), Duration::from_millis(200)).unwrap();
        let result = client.fetch_page(None).await;
        assert!(matches!(result, Err(PageError::Timeout)));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client =
            GalleryApiClient::new("http://127.0.0.1:8080/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url, "http://127.0.0.1:8080");
    }
}
