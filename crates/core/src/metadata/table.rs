use std::collections::HashMap;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use tracing::{debug, info, warn};

use super::csv::parse_table;
use super::types::{catalog_key, BadgeMetadata};
use super::{MetadataError, MetadataLookup};
use crate::metrics::{METADATA_LOOKUPS, METADATA_TABLE_ROWS};

/// Where the raw catalog sheet comes from.
pub trait MetadataSource: Send + Sync {
    /// Read the whole table as text.
    fn read_table(&self) -> Result<String, MetadataError>;
}

/// Reads the catalog sheet from a UTF-8 file on disk.
#[derive(Debug, Clone)]
pub struct FileMetadataSource {
    path: PathBuf,
}

impl FileMetadataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MetadataSource for FileMetadataSource {
    fn read_table(&self) -> Result<String, MetadataError> {
        if !self.path.exists() {
            return Err(MetadataError::NotFound(self.path.display().to_string()));
        }
        Ok(std::fs::read_to_string(&self.path)?)
    }
}

/// Catalog-number keyed cache over a [`MetadataSource`].
///
/// The source is read at most once, on the first lookup whose identifier
/// carries a catalog number. A failed read is cached as an empty table; the
/// table is never re-read for the lifetime of this value. Create one at
/// startup and share it by reference.
pub struct MetadataTable {
    source: Box<dyn MetadataSource>,
    entries: OnceCell<HashMap<String, BadgeMetadata>>,
}

impl MetadataTable {
    pub fn new(source: impl MetadataSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            entries: OnceCell::new(),
        }
    }

    /// Table backed by a CSV file.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(FileMetadataSource::new(path))
    }

    /// Whether the backing table has been read.
    pub fn is_loaded(&self) -> bool {
        self.entries.get().is_some()
    }

    /// Number of cached rows (0 until loaded).
    pub fn len(&self) -> usize {
        self.entries.get().map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> &HashMap<String, BadgeMetadata> {
        self.entries.get_or_init(|| {
            let entries = match self.source.read_table() {
                Ok(content) => {
                    let entries = parse_table(&content);
                    info!(rows = entries.len(), "Loaded badge metadata table");
                    entries
                }
                Err(e) => {
                    warn!(error = %e, "Badge metadata unavailable, continuing without enrichment");
                    HashMap::new()
                }
            };
            METADATA_TABLE_ROWS.set(entries.len() as i64);
            entries
        })
    }
}

impl MetadataLookup for MetadataTable {
    fn lookup(&self, identifier: &str) -> Option<BadgeMetadata> {
        let Some(key) = catalog_key(identifier) else {
            debug!(identifier, "No catalog number in identifier");
            METADATA_LOOKUPS.with_label_values(&["skipped"]).inc();
            return None;
        };

        let found = self.entries().get(key).cloned();
        let result = if found.is_some() { "hit" } else { "miss" };
        debug!(identifier, catalog_number = key, result, "Metadata lookup");
        METADATA_LOOKUPS.with_label_values(&[result]).inc();
        found
    }
}

impl std::fmt::Debug for MetadataTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataTable")
            .field("loaded", &self.is_loaded())
            .field("rows", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    const SHEET: &str = "sizeInMm,catalogNumber,title,bandName\n\
25,B001,Anarchy,\"Ramones, Joey\"\n\
32,B012,Spiral Scratch,Buzzcocks\n\
\"10, mm\",B007,\"Title, With Comma\",\n";

    /// Source that counts how often it is read.
    struct CountingSource {
        content: Option<&'static str>,
        reads: Arc<AtomicUsize>,
    }

    impl MetadataSource for CountingSource {
        fn read_table(&self) -> Result<String, MetadataError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.content
                .map(str::to_string)
                .ok_or_else(|| MetadataError::NotFound("memory".to_string()))
        }
    }

    fn counting(content: Option<&'static str>) -> (MetadataTable, Arc<AtomicUsize>) {
        let reads = Arc::new(AtomicUsize::new(0));
        let table = MetadataTable::new(CountingSource {
            content,
            reads: Arc::clone(&reads),
        });
        (table, reads)
    }

    #[test]
    fn test_lookup_hit() {
        let (table, _) = counting(Some(SHEET));
        let meta = table.lookup("B001_front").unwrap();
        assert_eq!(meta.catalog_number, "B001");
        assert_eq!(meta.title, "Anarchy");
        assert_eq!(meta.band_name.as_deref(), Some("Joey Ramones"));
    }

    #[test]
    fn test_lookup_miss_returns_none() {
        let (table, _) = counting(Some(SHEET));
        assert!(table.lookup("B999_front").is_none());
    }

    #[test]
    fn test_non_b_identifier_does_not_read_table() {
        let (table, reads) = counting(Some(SHEET));
        assert!(table.lookup("IMG_2041").is_none());
        assert_eq!(reads.load(Ordering::SeqCst), 0);
        assert!(!table.is_loaded());
    }

    #[test]
    fn test_table_read_at_most_once() {
        let (table, reads) = counting(Some(SHEET));
        table.lookup("B001_a");
        table.lookup("B012_b");
        table.lookup("B404_c");
        table.lookup("B007");
        assert_eq!(reads.load(Ordering::SeqCst), 1);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_unreadable_table_is_not_an_error_and_not_retried() {
        let (table, reads) = counting(None);
        assert!(table.lookup("B001_front").is_none());
        assert!(table.lookup("B012_front").is_none());
        assert_eq!(reads.load(Ordering::SeqCst), 1);
        assert!(table.is_loaded());
        assert!(table.is_empty());
    }

    #[test]
    fn test_file_source() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SHEET.as_bytes()).unwrap();

        let table = MetadataTable::from_path(file.path());
        let meta = table.lookup("B007_back").unwrap();
        assert_eq!(meta.size_in_mm, "10, mm");
        assert_eq!(meta.band_name, None);
    }

    #[test]
    fn test_missing_file_yields_no_metadata() {
        let table = MetadataTable::from_path("/nonexistent/badges.csv");
        assert!(table.lookup("B001_front").is_none());
    }
}
