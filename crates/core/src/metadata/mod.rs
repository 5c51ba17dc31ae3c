//! Badge metadata side-loaded from the catalog CSV.
//!
//! Enrichment is best-effort: a missing table, an unreadable file or an
//! unknown catalog number all resolve to "no metadata", never to an error
//! visible to the caller of [`MetadataLookup::lookup`].

mod csv;
mod table;
mod types;

pub use csv::{normalize_band_name, parse_csv_line, parse_table};
pub use table::{FileMetadataSource, MetadataSource, MetadataTable};
pub use types::*;

use thiserror::Error;

/// Errors raised while reading the backing table.
///
/// These never escape a lookup; they are logged and the table is treated as empty.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Metadata table not found: {0}")]
    NotFound(String),

    #[error("Failed to read metadata table: {0}")]
    Io(#[from] std::io::Error),
}

/// Answers "which badge does this image show?".
pub trait MetadataLookup: Send + Sync {
    /// Return the metadata for an image identifier, if any.
    fn lookup(&self, identifier: &str) -> Option<BadgeMetadata>;
}

impl<F> MetadataLookup for F
where
    F: Fn(&str) -> Option<BadgeMetadata> + Send + Sync,
{
    fn lookup(&self, identifier: &str) -> Option<BadgeMetadata> {
        self(identifier)
    }
}
