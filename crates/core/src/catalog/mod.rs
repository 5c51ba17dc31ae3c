//! Catalog index - the accumulated, ordered set of images a gallery view shows.
//!
//! Pages arrive from the media host in creation order; the index keeps them
//! deduplicated by identifier and ordered by catalog number.

mod builder;
mod types;

pub use builder::{merge, sort_key, SENTINEL_SORT_KEY};
pub use types::*;
