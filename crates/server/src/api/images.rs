//! `GET /api/images` - one page of badge photographs.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use gallery_core::{ImagePage, SearchPage, SearchRequest};
use serde::Deserialize;
use tracing::debug;

use super::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ImagesQuery {
    /// Cursor from the previous page's `nextCursor`.
    #[serde(default)]
    pub cursor: Option<String>,
    /// Client cache-buster, ignored.
    #[serde(default, rename = "_t")]
    pub cache_buster: Option<String>,
}

/// GET /api/images
///
/// Search the configured folder, newest first, and attach badge metadata
/// to each resource.
pub async fn list_images(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ImagesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(folder) = state.folder() else {
        return Err(ApiError::Configuration(
            "media_host.folder is not set".to_string(),
        ));
    };

    let request = SearchRequest::folder_images(
        folder,
        params.cursor,
        state.config().media_host.page_size,
    );
    let SearchPage {
        resources,
        next_cursor,
        ..
    } = state.media_host().search(&request).await?;

    // The first enrichment reads the CSV from disk.
    let table = state.metadata();
    let images = tokio::task::spawn_blocking(move || {
        let mut resources = resources;
        for record in &mut resources {
            record.attach_metadata(&*table);
        }
        resources
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Enrichment task failed: {}", e)))?;

    debug!(
        count = images.len(),
        has_more = next_cursor.is_some(),
        "Serving image page"
    );

    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        Json(ImagePage {
            images,
            next_cursor,
        }),
    ))
}
