//! Merging pages into the catalog index.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::types::ImageRecord;
use crate::media_host::RawRecord;
use crate::metadata::MetadataLookup;

/// Sort key for records without a usable catalog number. Sorts after every
/// real catalog number up to B9998.
pub const SENTINEL_SORT_KEY: u64 = 9999;

static CATALOG_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"B(\d+)").unwrap());

/// Numeric catalog order of a record, or [`SENTINEL_SORT_KEY`].
pub fn sort_key(record: &ImageRecord) -> u64 {
    record
        .catalog_number()
        .and_then(|n| CATALOG_NUMBER.captures(n))
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(SENTINEL_SORT_KEY)
}

/// Merge a page of raw records into an existing set.
///
/// Incoming records are mapped through [`ImageRecord::from_raw`]. For a
/// repeated identifier the last-seen content survives at the position of its
/// first occurrence. The whole result is then stably sorted by [`sort_key`],
/// so records sharing a key keep their arrival order. Performs no I/O beyond
/// what `lookup` does.
pub fn merge(
    existing: &[ImageRecord],
    incoming: &[RawRecord],
    lookup: &dyn MetadataLookup,
) -> Vec<ImageRecord> {
    let mut merged: Vec<ImageRecord> = Vec::with_capacity(existing.len() + incoming.len());
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(merged.capacity());

    let mapped = incoming.iter().map(|raw| ImageRecord::from_raw(raw, lookup));
    for record in existing.iter().cloned().chain(mapped) {
        match positions.get(&record.identifier) {
            Some(&at) => merged[at] = record,
            None => {
                positions.insert(record.identifier.clone(), merged.len());
                merged.push(record);
            }
        }
    }

    merged.sort_by_key(sort_key);
    merged
}
