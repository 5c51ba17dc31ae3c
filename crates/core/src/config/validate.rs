use super::{types::Config, ConfigError};

const MAX_PAGE_SIZE: u32 = 500;

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Media host credentials are present
/// - Page size and timeout are within range
///
/// A missing folder is not a startup error; `/api/images` reports it per request.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let media = &config.media_host;
    for (name, value) in [
        ("media_host.cloud_name", &media.cloud_name),
        ("media_host.api_key", &media.api_key),
        ("media_host.api_secret", &media.api_secret),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!("{} is required", name)));
        }
    }

    if media.page_size == 0 || media.page_size > MAX_PAGE_SIZE {
        return Err(ConfigError::ValidationError(format!(
            "media_host.page_size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }

    if media.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "media_host.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MediaHostConfig, ServerConfig};

    fn valid_config() -> Config {
        Config {
            media_host: MediaHostConfig {
                cloud_name: "rupture".to_string(),
                api_key: "key".to_string(),
                api_secret: "secret".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_missing_folder_is_allowed() {
        let config = valid_config();
        assert!(config.media_host.folder.is_none());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let config = Config {
            server: ServerConfig {
                port: 0,
                ..Default::default()
            },
            ..valid_config()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_missing_secret_fails() {
        let mut config = valid_config();
        config.media_host.api_secret = "  ".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("media_host.api_secret"));
    }

    #[test]
    fn test_validate_page_size_bounds() {
        let mut config = valid_config();
        config.media_host.page_size = 0;
        assert!(validate_config(&config).is_err());

        config.media_host.page_size = 501;
        assert!(validate_config(&config).is_err());

        config.media_host.page_size = 500;
        assert!(validate_config(&config).is_ok());
    }
}
