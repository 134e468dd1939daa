//! HTTP transport for the fetch pool
//!
//! This module handles all HTTP requests for the harvester, including:
//! - Building a fresh client (and so a fresh cookie store) per request
//! - Reading the body up to a fixed byte cap
//! - Lossy UTF-8 decoding
//! - Strict response validation: status 200 and no redirect

use crate::config::FetchConfig;
use crate::{FetchError, FetchResult};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use url::Url;

/// A page that passed response validation
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP status code (always 200 once validated)
    pub status_code: u16,

    /// Final URL after the client finished following redirects
    pub final_url: Url,

    /// Body decoded as UTF-8, invalid sequences replaced
    pub body: String,
}

/// Issues GET requests with a fixed header set, timeout and body cap
#[derive(Debug, Clone)]
pub struct TransportClient {
    headers: HeaderMap,
    timeout: Duration,
    max_content_length: usize,
}

impl TransportClient {
    /// Creates a transport from the fetch configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::HeaderValue` if a configured header name or
    /// value cannot be sent over HTTP.
    pub fn new(config: &FetchConfig) -> FetchResult<Self> {
        let mut headers = HeaderMap::new();

        if let Some(user_agent) = &config.user_agent {
            let value = HeaderValue::from_str(user_agent).map_err(|_| FetchError::HeaderValue {
                name: USER_AGENT.to_string(),
            })?;
            headers.insert(USER_AGENT, value);
        }

        for (name, value) in &config.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| FetchError::HeaderValue { name: name.clone() })?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| FetchError::HeaderValue { name: name.clone() })?;
            headers.insert(header_name, header_value);
        }

        Ok(Self {
            headers,
            timeout: config.timeout(),
            max_content_length: config.max_content_length,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_content_length(&self) -> usize {
        self.max_content_length
    }

    /// Builds a single-use HTTP client with an empty cookie store
    ///
    /// Cookies set during one fetch (including across its redirects) never
    /// leak into another.
    pub fn build_http_client(&self) -> Result<Client, reqwest::Error> {
        Client::builder()
            .default_headers(self.headers.clone())
            .timeout(self.timeout)
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .build()
    }

    /// Fetches `url` and returns the validated, decoded page
    ///
    /// # Response Validation
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | Status 200, final URL equals requested | `Ok(FetchedPage)` |
    /// | Any other status | `UnexpectedResponse` |
    /// | Redirected to a different URL | `UnexpectedResponse` |
    /// | Timeout (request or body) | `Timeout` |
    /// | Anything else from the client | `Transport` |
    ///
    /// The body is never read for a rejected response.
    pub async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        let requested = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let client = self
            .build_http_client()
            .map_err(|e| classify_error(url, e))?;

        let response = client
            .get(requested.clone())
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        let final_url = response.url().clone();

        // TODO: same-host redirects such as trailing-slash normalization are
        // rejected here too; relax to a host+path comparison if that proves noisy.
        if status != StatusCode::OK || final_url != requested {
            tracing::debug!(
                "Rejecting response for {}: status {}, final url {}",
                url,
                status,
                final_url
            );
            return Err(FetchError::UnexpectedResponse {
                url: url.to_string(),
                status: status.as_u16(),
                final_url: final_url.to_string(),
            });
        }

        let bytes = read_capped(response, self.max_content_length)
            .await
            .map_err(|e| classify_error(url, e))?;

        Ok(FetchedPage {
            status_code: status.as_u16(),
            final_url,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

/// Reads at most `limit` body bytes; the rest of the stream is left unread
async fn read_capped(mut response: Response, limit: usize) -> Result<Vec<u8>, reqwest::Error> {
    let mut body = Vec::new();

    while body.len() < limit {
        match response.chunk().await? {
            Some(chunk) => {
                let room = limit - body.len();
                body.extend_from_slice(&chunk[..chunk.len().min(room)]);
            }
            None => break,
        }
    }

    Ok(body)
}

fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            source: error,
        }
    }
}
