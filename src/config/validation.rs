use crate::config::types::{ClientConfig, RetryConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound on retries; the provider meters every attempt
const MAX_RETRIES_LIMIT: u32 = 10;

/// Validates the entire configuration
pub fn validate(config: &ClientConfig) -> Result<(), ConfigError> {
    validate_base_url(&config.base_url)?;
    validate_identity(config)?;
    validate_timeouts(config)?;
    validate_retry(&config.retry)?;
    Ok(())
}

/// Validates the provider base URL
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", base_url, e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            base_url
        )));
    }

    if url.query().is_some() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must not carry a query string",
            base_url
        )));
    }

    Ok(())
}

/// Validates the fixed client identity pair
fn validate_identity(config: &ClientConfig) -> Result<(), ConfigError> {
    if config.mobile_os.trim().is_empty() {
        return Err(ConfigError::Validation(
            "mobile-os cannot be empty".to_string(),
        ));
    }

    if config.mobile_app.trim().is_empty() {
        return Err(ConfigError::Validation(
            "mobile-app cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_timeouts(config: &ClientConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 || config.connect_timeout_secs > config.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be between 1 and timeout-secs ({}), got {}",
            config.timeout_secs, config.connect_timeout_secs
        )));
    }

    Ok(())
}

fn validate_retry(retry: &RetryConfig) -> Result<(), ConfigError> {
    if retry.max_retries > MAX_RETRIES_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max-retries must be <= {}, got {}",
            MAX_RETRIES_LIMIT, retry.max_retries
        )));
    }

    if retry.base_delay_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "base-delay-ms must be <= 60000, got {}",
            retry.base_delay_ms
        )));
    }

    Ok(())
}
