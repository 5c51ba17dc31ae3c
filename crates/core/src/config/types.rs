use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub media_host: MediaHostConfig,
    #[serde(default)]
    pub metadata: MetadataConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the built front-end, served for every non-API path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Hosted media library (Cloudinary) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaHostConfig {
    #[serde(default)]
    pub cloud_name: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_secret: String,
    /// Folder holding the badge photographs. Checked per request, not at startup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    /// Admin/search API base URL (default: https://api.cloudinary.com/v1_1)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Delivery base URL for rendered assets (default: https://res.cloudinary.com)
    #[serde(default = "default_delivery_base_url")]
    pub delivery_base_url: String,
    /// Request timeout in seconds (default: 15)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Resources per page (default: 12)
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for MediaHostConfig {
    fn default() -> Self {
        Self {
            cloud_name: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            folder: None,
            api_base_url: default_api_base_url(),
            delivery_base_url: default_delivery_base_url(),
            timeout_secs: default_timeout(),
            page_size: default_page_size(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.cloudinary.com/v1_1".to_string()
}

fn default_delivery_base_url() -> String {
    "https://res.cloudinary.com".to_string()
}

fn default_timeout() -> u32 {
    15
}

fn default_page_size() -> u32 {
    crate::media_host::DEFAULT_PAGE_SIZE
}

/// Badge metadata table configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetadataConfig {
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
        }
    }
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("public/data/Rupture_Badges _Metadata.csv")
}

/// Sanitized config for logging (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub media_host: SanitizedMediaHostConfig,
    pub metadata: MetadataConfig,
}

/// Sanitized media host config (credentials hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedMediaHostConfig {
    pub cloud_name: String,
    pub api_key_configured: bool,
    pub api_secret_configured: bool,
    pub folder_configured: bool,
    pub api_base_url: String,
    pub timeout_secs: u32,
    pub page_size: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        let media = &config.media_host;
        Self {
            server: config.server.clone(),
            media_host: SanitizedMediaHostConfig {
                cloud_name: media.cloud_name.clone(),
                api_key_configured: !media.api_key.is_empty(),
                api_secret_configured: !media.api_secret.is_empty(),
                folder_configured: media.folder.as_deref().is_some_and(|f| !f.is_empty()),
                api_base_url: media.api_base_url.clone(),
                timeout_secs: media.timeout_secs,
                page_size: media.page_size,
            },
            metadata: config.metadata.clone(),
        }
    }
}
