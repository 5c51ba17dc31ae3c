use serde::{Deserialize, Serialize};

use super::builder::merge;
use crate::media_host::RawRecord;
use crate::metadata::{BadgeMetadata, MetadataLookup};

/// One displayable image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    /// Last segment of the host's resource path.
    pub identifier: String,
    /// Full-resolution asset URL.
    pub source_url: String,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BadgeMetadata>,
}

impl ImageRecord {
    /// Map a raw host record, attaching metadata.
    ///
    /// Metadata already carried by the record wins; the lookup is only
    /// consulted when there is none.
    pub fn from_raw(raw: &RawRecord, lookup: &dyn MetadataLookup) -> Self {
        let identifier = raw.identifier().to_string();
        let metadata = raw
            .metadata
            .clone()
            .or_else(|| lookup.lookup(&identifier));

        Self {
            identifier,
            source_url: raw.secure_url.clone(),
            width: raw.width,
            height: raw.height,
            metadata,
        }
    }

    pub fn catalog_number(&self) -> Option<&str> {
        self.metadata.as_ref().map(|m| m.catalog_number.as_str())
    }
}

/// Deduplicated, sorted working set of images.
///
/// Grows with each merged page and is only emptied by [`CatalogIndex::clear`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogIndex {
    records: Vec<ImageRecord>,
}

impl CatalogIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a page of raw records and return how many new identifiers it added.
    pub fn merge_page(&mut self, page: &[RawRecord], lookup: &dyn MetadataLookup) -> usize {
        let before = self.records.len();
        self.records = merge(&self.records, page, lookup);
        self.records.len() - before
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ImageRecord> {
        self.records.get(index)
    }

    pub fn position_of(&self, identifier: &str) -> Option<usize> {
        self.records.iter().position(|r| r.identifier == identifier)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    // Lightbox navigation wraps around at both ends.

    pub fn next_index(&self, current: usize) -> Option<usize> {
        match self.records.len() {
            0 => None,
            len if current >= len - 1 => Some(0),
            _ => Some(current + 1),
        }
    }

    pub fn previous_index(&self, current: usize) -> Option<usize> {
        match self.records.len() {
            0 => None,
            len if current == 0 || current >= len => Some(len - 1),
            _ => Some(current - 1),
        }
    }

    /// "3 / 12" style position for the detail view.
    pub fn position_label(&self, current: usize) -> Option<String> {
        (current < self.records.len()).then(|| format!("{} / {}", current + 1, self.records.len()))
    }
}

impl IntoIterator for CatalogIndex {
    type Item = ImageRecord;
    type IntoIter = std::vec::IntoIter<ImageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
