//! HTTP client creation and the fetcher seam used by the relay chain

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::fetch_utils::fetch_text;
use crate::error::AppError;

/// Creates a properly configured HTTP client with connection pooling and timeout handling.
///
/// # Returns
/// * `Result<Client, reqwest::Error>` - A configured reqwest HTTP client or error
///
/// # Features
/// * Whole-request timeout (default: 25 seconds, configurable via config/env)
/// * Small idle pool; relays are different hosts and each is hit at most once
pub fn create_http_client_with_timeout(timeout_seconds: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .pool_max_idle_per_host(crate::constants::HTTP_POOL_MAX_IDLE_PER_HOST)
        .user_agent(crate::constants::USER_AGENT)
        .build()
}

/// Performs a single GET and returns the body of a 2xx response.
///
/// Implementations must not retry: a failure moves the caller on to the next relay.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get_text(&self, url: &str) -> Result<String, AppError>;
}

/// [`Fetcher`] backed by reqwest with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout_seconds: u64,
}

impl HttpFetcher {
    pub fn new(timeout_seconds: u64) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(timeout_seconds)?;
        Ok(Self {
            client,
            timeout_seconds,
        })
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get_text(&self, url: &str) -> Result<String, AppError> {
        fetch_text(&self.client, url, self.timeout_seconds).await
    }
}

