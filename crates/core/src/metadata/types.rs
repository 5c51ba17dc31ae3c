use serde::{Deserialize, Serialize};

/// One row of the badge catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BadgeMetadata {
    /// Badge diameter. Kept as text, the sheet has entries like "25 (approx)".
    pub size_in_mm: String,
    /// Join key, `B<digits>`.
    pub catalog_number: String,
    pub title: String,
    /// Band name in "First Last" order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band_name: Option<String>,
}

/// Derive the catalog number an image identifier refers to.
///
/// Identifiers look like `B012_front`; the key is the segment before the first
/// underscore. Returns `None` unless that segment starts with `B`.
pub fn catalog_key(identifier: &str) -> Option<&str> {
    let first = identifier.split('_').next().unwrap_or_default();
    // `B012.jpg` carries its extension on the only segment.
    let key = match first.split_once('.') {
        Some((stem, _)) => stem,
        None => first,
    };

    if key.starts_with('B') {
        Some(key)
    } else {
        None
    }
}
