use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Signing secret is not empty
/// - Token lifetime is positive
/// - Catalog CSV path is not empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.auth.secret.is_empty() {
        return Err(ConfigError::ValidationError(
            "auth.secret cannot be empty".to_string(),
        ));
    }

    if config.auth.token_ttl_minutes <= 0 {
        return Err(ConfigError::ValidationError(
            "auth.token_ttl_minutes must be positive".to_string(),
        ));
    }

    if config.catalog.csv_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "catalog.csv_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
