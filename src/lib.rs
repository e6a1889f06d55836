//! Tour-Atlas: a resilient client for a rate-limited tourism data provider
//!
//! This crate fetches, validates, and normalizes responses from a TourAPI-style
//! upstream service, retrying transient failures with exponential backoff, and
//! aggregates many such calls into regional/category statistics and content
//! recommendations while tolerating partial failure.

pub mod aggregate;
pub mod client;
pub mod config;
pub mod models;

use thiserror::Error;

/// Main error type for Tour-Atlas operations
#[derive(Debug, Error)]
pub enum TourError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Upstream rejected request with status {status}: {url}")]
    Client { status: u16, url: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Provider error {code}: {message}")]
    Provider { code: String, message: String },

    #[error("Request failed after {retries} retries: {cause}")]
    Transient {
        retries: u32,
        #[source]
        cause: TransientCause,
    },

    #[error("Unexpected upstream status {status}: {url}")]
    Status { status: u16, url: String },

    #[error("Response contained no items")]
    MissingData,

    #[error("Content {content_id} not found (status {status})")]
    NotFound { content_id: String, status: u16 },

    #[error("All {attempted} {scope} queries failed; last error: {last_error}")]
    AggregateExhausted {
        scope: &'static str,
        attempted: usize,
        last_error: String,
    },

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] ::url::ParseError),
}

/// Last underlying cause of a request that exhausted its retry budget
#[derive(Debug, Error)]
pub enum TransientCause {
    #[error("server responded with status {0}")]
    ServerStatus(u16),

    #[error("network failure: {0}")]
    Network(#[source] reqwest::Error),
}

/// Coarse classification of a [`TourError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required configuration is missing or invalid; never retried
    Configuration,
    /// The request itself is invalid (upstream 4xx, bad parameters, provider rejection)
    Client,
    /// Upstream 5xx or network failure that outlived its retry budget
    Transient,
    /// A well-formed envelope with no item in it
    MissingData,
    /// Mandatory content does not exist
    NotFound,
    /// Every branch of a fan-out failed
    AggregateExhaustion,
    /// Anything the provider contract does not account for
    Unexpected,
}

impl TourError {
    /// Classifies this error for callers deciding how to surface it
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Configuration,
            Self::Client { .. } | Self::InvalidParameter(_) | Self::Provider { .. } => {
                ErrorKind::Client
            }
            Self::Transient { .. } => ErrorKind::Transient,
            Self::MissingData => ErrorKind::MissingData,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::AggregateExhausted { .. } => ErrorKind::AggregateExhaustion,
            Self::Status { .. } | Self::Decode(_) | Self::Http(_) | Self::Url(_) => {
                ErrorKind::Unexpected
            }
        }
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Client { status, .. }
            | Self::Status { status, .. }
            | Self::NotFound { status, .. } => Some(*status),
            Self::Transient {
                cause: TransientCause::ServerStatus(status),
                ..
            } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if this is an upstream 404
    pub fn is_not_found_status(&self) -> bool {
        matches!(self, Self::Client { status: 404, .. })
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Service credential missing: set {primary} or {fallback}")]
    MissingCredential {
        primary: &'static str,
        fallback: &'static str,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Tour-Atlas operations
pub type Result<T> = std::result::Result<T, TourError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use aggregate::{category_stats, recommend, region_stats, stats_summary};
pub use client::{TourApi, TourClient};
pub use config::ClientConfig;
