//! Cloudinary search API client.
//!
//! Uses the Admin API search endpoint with HTTP basic auth
//! (`api_key:api_secret`).

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{RawRecord, SearchPage, SearchRequest};
use super::{MediaHost, MediaHostError};
use crate::config::MediaHostConfig;
use crate::metrics::{EXTERNAL_SERVICE_DURATION, EXTERNAL_SERVICE_REQUESTS, SEARCH_RESULTS};

const SERVICE: &str = "cloudinary";

/// Cloudinary API client.
pub struct CloudinaryClient {
    client: Client,
    api_base_url: String,
    delivery_base_url: String,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

impl CloudinaryClient {
    /// Create a new Cloudinary client.
    pub fn new(config: &MediaHostConfig) -> Result<Self, MediaHostError> {
        if config.cloud_name.is_empty() {
            return Err(MediaHostError::NotConfigured(
                "Cloudinary cloud name is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .build()?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            delivery_base_url: config.delivery_base_url.trim_end_matches('/').to_string(),
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        })
    }

    async fn execute_search(&self, request: &SearchRequest) -> Result<SearchPage, MediaHostError> {
        let url = format!("{}/{}/resources/search", self.api_base_url, self.cloud_name);

        debug!(
            expression = %request.expression,
            cursor = ?request.cursor,
            max_results = request.max_results,
            "Cloudinary search"
        );

        let body = SearchBody {
            expression: &request.expression,
            sort_by: vec![SortField {
                created_at: "desc",
            }],
            max_results: request.max_results,
            with_field: ["tags", "context"],
            next_cursor: request.cursor.as_deref(),
        };

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MediaHostError::Timeout
                } else {
                    MediaHostError::HttpError(e)
                }
            })?;

        let status = response.status();
        if status == 401 || status == 403 {
            return Err(MediaHostError::NotConfigured(
                "Cloudinary rejected the API credentials".to_string(),
            ));
        }
        if status == 429 {
            return Err(MediaHostError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MediaHostError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let result: SearchResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                MediaHostError::Timeout
            } else {
                MediaHostError::ParseError(format!("Failed to parse search response: {}", e))
            }
        })?;

        Ok(result.into())
    }
}

#[async_trait]
impl MediaHost for CloudinaryClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, MediaHostError> {
        let start = Instant::now();
        let result = self.execute_search(request).await;

        EXTERNAL_SERVICE_DURATION
            .with_label_values(&[SERVICE, "search"])
            .observe(start.elapsed().as_secs_f64());
        let status = if result.is_ok() { "success" } else { "error" };
        EXTERNAL_SERVICE_REQUESTS
            .with_label_values(&[SERVICE, "search", status])
            .inc();
        if let Ok(page) = &result {
            SEARCH_RESULTS.observe(page.resources.len() as f64);
        }

        result
    }

    fn delivery_url(&self, public_id: &str, transforms: Option<&str>) -> String {
        let public_id = public_id
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        match transforms.filter(|t| !t.is_empty()) {
            Some(t) => format!(
                "{}/{}/image/upload/{}/{}",
                self.delivery_base_url, self.cloud_name, t, public_id
            ),
            None => format!(
                "{}/{}/image/upload/{}",
                self.delivery_base_url, self.cloud_name, public_id
            ),
        }
    }
}

// ============================================================================
// Cloudinary API types (internal)
// ============================================================================

#[derive(Debug, Serialize)]
struct SearchBody<'a> {
    expression: &'a str,
    sort_by: Vec<SortField>,
    max_results: u32,
    with_field: [&'static str; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    next_cursor: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct SortField {
    created_at: &'static str,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    resources: Vec<CloudinaryResource>,
    #[serde(default)]
    next_cursor: Option<String>,
    #[serde(default)]
    total_count: Option<u64>,
}

/// Resource as returned by Cloudinary. Its own `metadata` field (structured
/// metadata) is not used by the gallery and is not deserialized.
#[derive(Debug, Deserialize)]
struct CloudinaryResource {
    public_id: String,
    secure_url: String,
    width: u32,
    height: u32,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    context: Option<serde_json::Value>,
}

impl From<CloudinaryResource> for RawRecord {
    fn from(r: CloudinaryResource) -> Self {
        Self {
            public_id: r.public_id,
            secure_url: r.secure_url,
            width: r.width,
            height: r.height,
            format: r.format,
            tags: r.tags,
            context: r.context,
            metadata: None,
        }
    }
}

impl From<SearchResponse> for SearchPage {
    fn from(r: SearchResponse) -> Self {
        Self {
            resources: r.resources.into_iter().map(RawRecord::from).collect(),
            next_cursor: r.next_cursor.filter(|c| !c.is_empty()),
            total_count: r.total_count,
        }
    }
}
