use crate::config::types::{ClientConfig, ServiceKey, SettingsFile};
use crate::config::validation::validate;
use crate::config::{PUBLIC_SERVICE_KEY_ENV, SERVICE_KEY_ENV};
use crate::ConfigError;
use std::path::Path;

/// Loads a settings file and resolves the credential from the environment
///
/// # Arguments
///
/// * `path` - Path to the TOML settings file
///
/// # Returns
///
/// * `Ok(ClientConfig)` - Loaded, credentialed, and validated configuration
/// * `Err(ConfigError)` - Failed to read, parse, or validate, or no credential
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use tour_atlas::config::load_config;
///
/// let config = load_config(Path::new("tour-atlas.toml")).unwrap();
/// println!("Base URL: {}", config.base_url);
/// ```
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content, env_lookup)
}

/// Builds a configuration from defaults plus the environment credential
pub fn config_from_env() -> Result<ClientConfig, ConfigError> {
    let service_key = resolve_service_key(env_lookup)?;
    let config = ClientConfig::from_settings(SettingsFile::default(), service_key);
    validate(&config)?;
    Ok(config)
}

/// Parses settings text and resolves the credential through `lookup`
pub fn parse_config<F>(content: &str, lookup: F) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let settings: SettingsFile = toml::from_str(content)?;
    let service_key = resolve_service_key(lookup)?;
    let config = ClientConfig::from_settings(settings, service_key);
    validate(&config)?;
    Ok(config)
}

/// Resolves the provider credential
///
/// The server-side variable wins over the public fallback; blank values
/// count as absent.
pub fn resolve_service_key<F>(lookup: F) -> Result<ServiceKey, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    [SERVICE_KEY_ENV, PUBLIC_SERVICE_KEY_ENV]
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
        .map(ServiceKey::new)
        .unwrap_or(Err(ConfigError::MissingCredential {
            primary: SERVICE_KEY_ENV,
            fallback: PUBLIC_SERVICE_KEY_ENV,
        }))
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
