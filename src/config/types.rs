use serde::Deserialize;
use std::fmt;

/// Default provider base path
pub const DEFAULT_BASE_URL: &str = "https://apis.data.go.kr/B551011/KorService1";

/// Default client identity sent as `MobileOS`
pub const DEFAULT_MOBILE_OS: &str = "ETC";

/// Default client identity sent as `MobileApp`
pub const DEFAULT_MOBILE_APP: &str = "TourAtlas";

/// Fully resolved client configuration
///
/// Built once and shared read-only by every request. The credential is
/// checked when the configuration is constructed, never per call.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base path that operation names are appended to
    pub base_url: String,

    /// Provider credential sent as `serviceKey`
    pub service_key: ServiceKey,

    /// Client identity pair sent as `MobileOS` / `MobileApp`
    pub mobile_os: String,
    pub mobile_app: String,

    /// User agent for outgoing requests
    pub user_agent: String,

    /// Whole-request timeout in seconds
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds
    pub connect_timeout_secs: u64,

    /// Retry and backoff settings for the fetcher
    pub retry: RetryConfig,
}

impl ClientConfig {
    /// Creates a configuration with default settings and the given credential
    ///
    /// # Returns
    ///
    /// * `Ok(ClientConfig)` - Credential present
    /// * `Err(ConfigError::MissingCredential)` - Credential blank
    pub fn new(service_key: impl Into<String>) -> crate::ConfigResult<Self> {
        let service_key = ServiceKey::new(service_key)?;
        Ok(Self::from_settings(SettingsFile::default(), service_key))
    }

    /// Points the client at a different base path (mock servers, mirrors)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replaces the retry settings
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub(crate) fn from_settings(settings: SettingsFile, service_key: ServiceKey) -> Self {
        Self {
            base_url: settings.client.base_url,
            service_key,
            mobile_os: settings.client.mobile_os,
            mobile_app: settings.client.mobile_app,
            user_agent: settings.client.user_agent,
            timeout_secs: settings.client.timeout_secs,
            connect_timeout_secs: settings.client.connect_timeout_secs,
            retry: settings.retry,
        }
    }
}

/// Retry and backoff configuration
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries after the first attempt (total attempts = max_retries + 1)
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry; doubles on each subsequent retry
    #[serde(rename = "base-delay-ms", default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1000
}

/// Provider credential
///
/// Never printed in full; `Debug` shows only that a key is present.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceKey(String);

impl ServiceKey {
    /// Wraps a credential, rejecting blank values
    pub fn new(value: impl Into<String>) -> crate::ConfigResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(crate::ConfigError::MissingCredential {
                primary: super::SERVICE_KEY_ENV,
                fallback: super::PUBLIC_SERVICE_KEY_ENV,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the raw credential for the query string
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ServiceKey(***)")
    }
}

/// On-disk settings file; the credential never lives here
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub client: ClientSettings,
    #[serde(default)]
    pub retry: RetryConfig,
}

/// `[client]` table of the settings file
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSettings {
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    #[serde(rename = "mobile-os", default = "default_mobile_os")]
    pub mobile_os: String,

    #[serde(rename = "mobile-app", default = "default_mobile_app")]
    pub mobile_app: String,

    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            mobile_os: default_mobile_os(),
            mobile_app: default_mobile_app(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_mobile_os() -> String {
    DEFAULT_MOBILE_OS.to_string()
}

fn default_mobile_app() -> String {
    DEFAULT_MOBILE_APP.to_string()
}

fn default_user_agent() -> String {
    format!("tour-atlas/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_connect_timeout_secs() -> u64 {
    5
}
