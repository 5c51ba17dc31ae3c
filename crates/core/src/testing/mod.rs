//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the external boundaries,
//! allowing end-to-end testing without a real media host or gallery server.
//!
//! # Example
//!
//! ```rust,ignore
//! use gallery_core::testing::{fixtures, MockMediaHost};
//!
//! let host = MockMediaHost::new();
//! host.push_page(fixtures::search_page(&["badges/B001_front"], Some("next"))).await;
//!
//! // Use in AppState...
//! ```

mod mock_media_host;
mod mock_page_source;

pub use mock_media_host::MockMediaHost;
pub use mock_page_source::MockPageSource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::media_host::{RawRecord, SearchPage};
    use crate::metadata::BadgeMetadata;
    use crate::pagination::ImagePage;

    /// CSV sheet with a handful of badges, including quoted fields.
    pub const BADGE_SHEET: &str = "sizeInMm,catalogNumber,title,bandName\n\
25,B001,Anarchy in the UK,Sex Pistols\n\
25,B003,Blitzkrieg Bop,\"Ramones, Joey\"\n\
32,B012,Spiral Scratch,Buzzcocks\n\
\"10, mm\",B007,\"Title, With Comma\",\n";

    /// Create a raw record with reasonable defaults.
    pub fn raw_record(public_id: &str) -> RawRecord {
        RawRecord {
            public_id: public_id.to_string(),
            secure_url: format!(
                "https://res.cloudinary.com/test/image/upload/v1/{}.jpg",
                public_id
            ),
            width: 800,
            height: 800,
            format: Some("jpg".to_string()),
            tags: None,
            context: None,
            metadata: None,
        }
    }

    /// Create badge metadata without a band.
    pub fn badge(catalog_number: &str, title: &str) -> BadgeMetadata {
        BadgeMetadata {
            size_in_mm: "25".to_string(),
            catalog_number: catalog_number.to_string(),
            title: title.to_string(),
            band_name: None,
        }
    }

    /// Gallery API page of raw records.
    pub fn page(public_ids: &[&str], next_cursor: Option<&str>) -> ImagePage {
        ImagePage {
            images: public_ids.iter().map(|id| raw_record(id)).collect(),
            next_cursor: next_cursor.map(str::to_string),
        }
    }

    /// Media host search page.
    pub fn search_page(public_ids: &[&str], next_cursor: Option<&str>) -> SearchPage {
        SearchPage {
            resources: public_ids.iter().map(|id| raw_record(id)).collect(),
            next_cursor: next_cursor.map(str::to_string),
            total_count: None,
        }
    }
}
