//! News-Harvest: concurrent news headline fetcher
//!
//! This crate fetches a list of news category pages with a bounded pool of
//! workers, extracts headline items from each page and hands the results to a
//! consumer, optionally through a dispatch queue that keeps consumer-owned
//! state on a single thread.

pub mod board;
pub mod config;
pub mod dispatch;
pub mod harvest;
pub mod output;
pub mod state;
pub mod targets;
pub mod url;

use thiserror::Error;

/// Main error type for News-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Board error: {0}")]
    Board(#[from] BoardError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a single fetch+extract attempt
///
/// Attached to a [`harvest::FetchOutcome`] rather than propagated, so one
/// target's failure never reaches sibling workers.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Unknown service for {url}")]
    UnknownService { url: String },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Unexpected response for {url}: status {status}, final url {final_url}")]
    UnexpectedResponse {
        url: String,
        status: u16,
        final_url: String,
    },

    #[error("HTTP error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: ::url::ParseError,
    },

    #[error("Invalid header {name}")]
    HeaderValue { name: String },
}

impl FetchError {
    /// Returns true if the error was produced without touching the network
    pub fn is_rejected_upfront(&self) -> bool {
        matches!(
            self,
            Self::UnknownService { .. } | Self::InvalidUrl { .. } | Self::HeaderValue { .. }
        )
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid service pattern: {0}")]
    InvalidPattern(String),
}

/// Errors raised by the interactive board controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("A fetch cycle is already in progress")]
    Busy,
}

/// Result type alias for News-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for a single fetch+extract attempt
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use dispatch::{DispatchLoop, Dispatcher};
pub use harvest::{FetchHooks, FetchOutcome, FetchTarget, NewsFetcher, NewsItem};
pub use state::WorkerState;
pub use crate::url::unwrap_redirect;
