use crate::url::DEFAULT_SERVICE_PATTERN;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Default number of concurrent workers
pub const DEFAULT_CONCURRENCY: u32 = 20;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default cap on bytes read from one response body
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 10_000_000;

/// Default dispatch queue polling cadence in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Main configuration structure for News-Harvest
///
/// Every section is optional; a missing file section falls back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// Overrides the built-in target list
    #[serde(default)]
    pub urls: Option<Vec<String>>,
}

/// Fetch pool and transport configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Number of concurrent workers
    #[serde(default = "default_concurrency")]
    pub concurrency: u32,

    /// Request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of body bytes read per response
    #[serde(rename = "max-content-length", default = "default_max_content_length")]
    pub max_content_length: usize,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default)]
    pub user_agent: Option<String>,

    /// Extra request headers
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            user_agent: None,
            headers: BTreeMap::new(),
        }
    }
}

/// Supported service patterns
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    /// Regular expressions a target URL must match to be fetched
    #[serde(default = "default_allowed_services")]
    pub allowed: Vec<String>,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            allowed: default_allowed_services(),
        }
    }
}

/// Dispatch queue configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    /// Consumer loop polling cadence (milliseconds)
    #[serde(rename = "poll-interval-ms", default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl DispatchConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

/// Result line formatting
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Append the resolved URL after each title
    #[serde(rename = "show-url", default)]
    pub show_url: bool,

    /// Separator between title and URL (a single space when unset)
    #[serde(rename = "url-separator", default)]
    pub url_separator: Option<String>,
}

fn default_concurrency() -> u32 {
    DEFAULT_CONCURRENCY
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_content_length() -> usize {
    DEFAULT_MAX_CONTENT_LENGTH
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_allowed_services() -> Vec<String> {
    vec![DEFAULT_SERVICE_PATTERN.to_string()]
}
