//! Error responses for the public API.
//!
//! Clients only ever see a generic `{ "error": ... }` body; the detail goes
//! to the log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gallery_core::MediaHostError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required setting is missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The media host failed or could not be reached.
    #[error("Upstream error: {0}")]
    Upstream(#[from] MediaHostError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn public_message(&self) -> &'static str {
        match self {
            ApiError::Configuration(_) => "Server configuration error",
            ApiError::Upstream(_) => "Failed to fetch images",
            ApiError::Internal(_) => "Internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self, "Request failed");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: self.public_message().to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_messages_hide_details() {
        let err = ApiError::Configuration("media_host.folder is not set".to_string());
        assert_eq!(err.public_message(), "Server configuration error");

        let err = ApiError::from(MediaHostError::Timeout);
        assert_eq!(err.public_message(), "Failed to fetch images");
    }

    #[test]
    fn test_into_response_is_500() {
        let response = ApiError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
