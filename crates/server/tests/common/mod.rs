//! Common test utilities for API testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock media host and a temporary badge sheet, enabling API tests
//! without a real Cloudinary account.

#![allow(dead_code)]

use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::NamedTempFile;
use tower::ServiceExt;

use gallery_core::testing::{fixtures, MockMediaHost};
use gallery_core::{Config, MediaHost, MediaHostConfig, MetadataTable};
use gallery_server::state::AppState;

/// Test fixture with a mock media host.
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock media host - configure search pages
    pub media_host: Arc<MockMediaHost>,
    /// Metadata table shared with the router
    pub metadata: Arc<MetadataTable>,
    /// Backing CSV, kept alive for the fixture's lifetime
    pub sheet: NamedTempFile,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub folder: Option<String>,
    pub page_size: u32,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            folder: Some("badges".to_string()),
            page_size: 12,
        }
    }
}

impl TestFixture {
    /// Create a new test fixture with default settings.
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(test_config: TestConfig) -> Self {
        let mut sheet = NamedTempFile::new().expect("Failed to create sheet");
        sheet
            .write_all(fixtures::BADGE_SHEET.as_bytes())
            .expect("Failed to write sheet");

        let mut config = Config {
            media_host: MediaHostConfig {
                cloud_name: "test".to_string(),
                api_key: "key".to_string(),
                api_secret: "secret".to_string(),
                folder: test_config.folder,
                page_size: test_config.page_size,
                ..Default::default()
            },
            ..Default::default()
        };
        config.metadata.csv_path = sheet.path().to_path_buf();

        let media_host = Arc::new(MockMediaHost::new());
        let metadata = Arc::new(MetadataTable::from_path(sheet.path()));

        let state = Arc::new(AppState::new(
            config,
            Arc::clone(&media_host) as Arc<dyn MediaHost>,
            Arc::clone(&metadata),
        ));
        let router = gallery_server::api::create_router(state);

        Self {
            router,
            media_host,
            metadata,
            sheet,
        }
    }

    /// Send a GET request to the test router.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body_bytes).into()))
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Serve the router on an ephemeral local port.
    pub async fn serve(&self) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().unwrap();
        let router = self.router.clone();
        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });
        addr
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
