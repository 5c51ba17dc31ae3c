use std::sync::Arc;

use gallery_core::{Config, MediaHost, MetadataTable, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    media_host: Arc<dyn MediaHost>,
    metadata: Arc<MetadataTable>,
}

impl AppState {
    pub fn new(config: Config, media_host: Arc<dyn MediaHost>, metadata: Arc<MetadataTable>) -> Self {
        Self {
            config,
            media_host,
            metadata,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    /// Folder to list, if configured and non-empty.
    pub fn folder(&self) -> Option<&str> {
        self.config
            .media_host
            .folder
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
    }

    pub fn media_host(&self) -> &dyn MediaHost {
        self.media_host.as_ref()
    }

    pub fn metadata(&self) -> Arc<MetadataTable> {
        Arc::clone(&self.metadata)
    }
}
