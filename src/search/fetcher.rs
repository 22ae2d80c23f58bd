//! Bounded single-attempt retrieval of a site.
//!
//! # Responsibilities
//! - GET one address with the configured timeout
//! - Classify failures (bad address, timeout, transport, non-200 status)
//! - Degrade an unreadable body to an empty one (a body read that times out stays a timeout)
//!
//! # Design Decisions
//! - One shared `reqwest::Client` per Fetcher; connections are pooled across probes
//! - The timeout is fixed when the Fetcher is built, never read per call
//! - Responses are dropped on every return path, releasing the connection

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use crate::config::FetchConfig;

/// Why a single fetch failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The address could not be parsed as a URL.
    #[error("invalid address {address:?}: {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: url::ParseError,
    },

    /// The fetch did not complete within the configured timeout.
    #[error("fetching {address} timed out after {after:?}")]
    Timeout { address: String, after: Duration },

    /// Connection, protocol or request construction failure.
    #[error("fetching {address} failed: {source}")]
    Transport {
        address: String,
        #[source]
        source: reqwest::Error,
    },

    /// The site answered with something other than 200 OK.
    #[error("fetching {address} returned status {status}")]
    Status { address: String, status: StatusCode },

    /// The HTTP client itself could not be built.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// Fetches site bodies with a fixed timeout.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl Fetcher {
    /// Build a fetcher from the fetch settings.
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let timeout = config.timeout();
        let mut builder = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.clone());
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(FetchError::ClientBuild)?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GET `address` and return its body.
    ///
    /// Only a 200 response is a success. A body that cannot be read after a
    /// 200 is returned as an empty string, unless the read ran past the timeout.
    pub async fn fetch(&self, address: &str) -> Result<String, FetchError> {
        let url = Url::parse(address).map_err(|source| FetchError::InvalidAddress {
            address: address.to_string(),
            source,
        })?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| self.classify(address, source))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                address: address.to_string(),
                status,
            });
        }

        match response.text().await {
            Ok(body) => Ok(body),
            // A body stalled past the deadline is a timed-out fetch, not an empty page.
            Err(e) if e.is_timeout() => Err(self.classify(address, e)),
            Err(e) => {
                tracing::warn!(address = %address, error = %e, "Failed to read body, treating as empty");
                Ok(String::new())
            }
        }
    }

    fn classify(&self, address: &str, source: reqwest::Error) -> FetchError {
        if source.is_timeout() {
            FetchError::Timeout {
                address: address.to_string(),
                after: self.timeout,
            }
        } else {
            FetchError::Transport {
                address: address.to_string(),
                source,
            }
        }
    }
}
