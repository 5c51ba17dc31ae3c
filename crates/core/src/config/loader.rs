use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Variable names the gallery deployment has always been configured with,
/// mapped onto their config keys.
///
/// `NEXT_PUBLIC_CLOUDINARY_CLOUD_NAME` is only a fallback: when both cloud
/// name variables are set, `CLOUDINARY_CLOUD_NAME` wins.
const LEGACY_ENV_KEYS: [(&str, &str); 5] = [
    ("NEXT_PUBLIC_CLOUDINARY_CLOUD_NAME", "media_host.cloud_name"),
    ("CLOUDINARY_CLOUD_NAME", "media_host.cloud_name"),
    ("CLOUDINARY_API_KEY", "media_host.api_key"),
    ("CLOUDINARY_API_SECRET", "media_host.api_secret"),
    ("CLOUDINARY_FOLDER", "media_host.folder"),
];

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    extract(Figment::new().merge(Toml::file(path)))
}

/// Load configuration from defaults and environment variables only
pub fn load_config_from_env() -> Result<Config, ConfigError> {
    extract(Figment::new())
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn extract(figment: Figment) -> Result<Config, ConfigError> {
    // One provider per legacy name, merged in table order, so later names
    // take precedence over earlier ones regardless of environment order.
    let figment = LEGACY_ENV_KEYS
        .iter()
        .fold(figment, |figment, &(var, key)| figment.merge(legacy_var(var, key)));

    figment
        .merge(Env::prefixed("GALLERY_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn legacy_var(var: &'static str, key: &'static str) -> Env {
    Env::raw().only(&[var]).map(move |_| key.into())
}
