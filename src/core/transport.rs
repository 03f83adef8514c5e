use crate::core::Fetcher;
use crate::utils::error::{FetchError, Result, RouteError};
use crate::utils::logger::redact_key;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// `Fetcher` over HTTP. Each call is a single GET with no retries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| RouteError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        tracing::debug!("Requesting directions: {}", redact_key(url));
        let response = self.client.get(url).send().await?;

        let status = response.status();
        tracing::debug!("Directions response status: {}", status);
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        // A failed body read is an I/O failure even when reqwest tags it otherwise.
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Io(e.to_string())
            }
        })?;
        tracing::debug!("Read {} bytes of directions response", body.len());
        Ok(body)
    }
}
