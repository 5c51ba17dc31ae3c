pub mod catalog;
pub mod config;
pub mod media_host;
pub mod metadata;
pub mod metrics;
pub mod pagination;
pub mod testing;

pub use catalog::{merge, sort_key, CatalogIndex, ImageRecord, SENTINEL_SORT_KEY};
pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config,
    ConfigError, MediaHostConfig, MetadataConfig, SanitizedConfig, ServerConfig,
};
pub use media_host::{
    CloudinaryClient, MediaHost, MediaHostError, RawRecord, SearchPage, SearchRequest,
};
pub use metadata::{
    catalog_key, BadgeMetadata, FileMetadataSource, MetadataError, MetadataLookup,
    MetadataSource, MetadataTable,
};
pub use pagination::{
    GalleryApiClient, ImagePage, LoadOutcome, PageError, PageRequest, PageSource,
    PaginationDriver, PaginationPhase,
};
