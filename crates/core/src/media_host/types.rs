//! Wire types for media host search results.

use serde::{Deserialize, Serialize};

use crate::metadata::{BadgeMetadata, MetadataLookup};

/// Default number of resources per page.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// One page of a resource search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Search expression in the host's query language.
    pub expression: String,
    /// Cursor returned by the previous page, `None` for the first page.
    pub cursor: Option<String>,
    pub max_results: u32,
}

impl SearchRequest {
    /// Images in `folder`, newest first.
    pub fn folder_images(folder: &str, cursor: Option<String>, max_results: u32) -> Self {
        Self {
            expression: format!("resource_type:image AND folder={}", folder),
            cursor: cursor.filter(|c| !c.is_empty()),
            max_results,
        }
    }
}

/// An image resource as the gallery API hands it to clients.
///
/// `metadata` is filled in server-side from the badge table when a row matches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawRecord {
    /// Opaque resource path, e.g. `badges/B012_front`.
    pub public_id: String,
    pub secure_url: String,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Free-form contextual key/values attached in the media library.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BadgeMetadata>,
}

impl RawRecord {
    /// Final path segment of the resource path.
    pub fn identifier(&self) -> &str {
        self.public_id
            .rsplit('/')
            .next()
            .unwrap_or(&self.public_id)
    }

    /// Attach table metadata unless the record already carries some.
    pub fn attach_metadata(&mut self, lookup: &dyn MetadataLookup) {
        if self.metadata.is_none() {
            self.metadata = lookup.lookup(self.identifier());
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub resources: Vec<RawRecord>,
    /// Cursor for the next page; `None` once the listing is exhausted.
    pub next_cursor: Option<String>,
    pub total_count: Option<u64>,
}
