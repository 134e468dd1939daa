use crate::config::types::{Config, DispatchConfig, FetchConfig, OutputConfig, ServicesConfig};
use crate::url::ServiceMatcher;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_services_config(&config.services)?;
    validate_dispatch_config(&config.dispatch)?;
    validate_output_config(&config.output)?;
    if let Some(urls) = &config.urls {
        validate_urls(urls)?;
    }
    Ok(())
}

/// Validates fetch pool and transport configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.concurrency < 1 || config.concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 100, got {}",
            config.concurrency
        )));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.max_content_length == 0 {
        return Err(ConfigError::Validation(
            "max-content-length must be >= 1".to_string(),
        ));
    }

    if let Some(user_agent) = &config.user_agent {
        if user_agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user-agent cannot be blank".to_string(),
            ));
        }
    }

    for name in config.headers.keys() {
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ConfigError::Validation(format!(
                "header name must contain only ASCII alphanumerics and hyphens, got '{}'",
                name
            )));
        }
    }

    Ok(())
}

/// Validates that every service pattern compiles
fn validate_services_config(config: &ServicesConfig) -> Result<(), ConfigError> {
    if config.allowed.is_empty() {
        return Err(ConfigError::Validation(
            "services.allowed must list at least one pattern".to_string(),
        ));
    }

    ServiceMatcher::new(&config.allowed)?;
    Ok(())
}

fn validate_dispatch_config(config: &DispatchConfig) -> Result<(), ConfigError> {
    if config.poll_interval_ms < 10 || config.poll_interval_ms > 10_000 {
        return Err(ConfigError::Validation(format!(
            "poll-interval-ms must be between 10 and 10000, got {}",
            config.poll_interval_ms
        )));
    }

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if let Some(separator) = &config.url_separator {
        if separator.is_empty() || separator.contains('\n') {
            return Err(ConfigError::Validation(
                "url-separator must be non-empty and single-line".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates a target URL list
///
/// Only syntax and scheme are checked here; whether a target belongs to a
/// supported service is decided per target at fetch time.
pub fn validate_urls(urls: &[String]) -> Result<(), ConfigError> {
    for raw in urls {
        let url = Url::parse(raw)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid target URL '{}': {}", raw, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "Target URL '{}' must use http or https",
                raw
            )));
        }
    }

    Ok(())
}
