//! Configuration module for Tour-Atlas
//!
//! Settings (base path, client identity, timeouts, retry policy) come from an
//! optional TOML file; the provider credential always comes from the
//! environment and is checked once, when the configuration is built.
//!
//! # Example
//!
//! ```no_run
//! use tour_atlas::config::config_from_env;
//!
//! let config = config_from_env().unwrap();
//! println!("Retries per request: {}", config.retry.max_retries);
//! ```

mod parser;
mod types;
mod validation;

/// Server-side credential variable; preferred source
pub const SERVICE_KEY_ENV: &str = "TOUR_API_KEY";

/// Public fallback credential variable
pub const PUBLIC_SERVICE_KEY_ENV: &str = "PUBLIC_TOUR_API_KEY";

// Re-export types
pub use types::{
    ClientConfig, ClientSettings, RetryConfig, ServiceKey, SettingsFile, DEFAULT_BASE_URL,
    DEFAULT_MOBILE_APP, DEFAULT_MOBILE_OS,
};

// Re-export parser functions
pub use parser::{config_from_env, load_config, parse_config, resolve_service_key};
pub use validation::validate;
