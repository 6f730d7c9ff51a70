use crate::errors::fetch_context;
use crate::rate_limiter::RateLimiter;
use anyhow::{Context, Result, bail};
use log::warn;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

const RETRY_STATUSES: [StatusCode; 3] = [
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::GATEWAY_TIMEOUT,
];

/// HTTP client with built-in rate limiting and retries on transient server errors
pub struct RateLimitedClient {
    client: Client,
    rate_limiter: RateLimiter,
    max_retries: u32,
}

impl RateLimitedClient {
    pub fn new(user_agent: &str, timeout_secs: u64, rate_limit_ms: u64, max_retries: u32) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;
        let rate_limiter = RateLimiter::new(rate_limit_ms);

        Ok(Self {
            client,
            rate_limiter,
            max_retries,
        })
    }

    pub async fn get(&mut self, url: &str) -> Result<reqwest::Response> {
        let mut attempt = 0;
        loop {
            self.rate_limiter.wait().await;
            let result = self.send_get_request(url).await;

            let retryable = match &result {
                Ok(response) => is_retryable(response.status()),
                Err(_) => true,
            };
            if !retryable || attempt >= self.max_retries {
                return result;
            }

            attempt += 1;
            warn!("Retrying {} (attempt {}/{})", url, attempt, self.max_retries);
        }
    }

    /// GET a JSON document, failing on any non-success status
    pub async fn get_json(&mut self, url: &str) -> Result<Value> {
        let response = self.get(url).await.with_context(|| fetch_context(url))?;

        if !response.status().is_success() {
            bail!("{}: API returned status {}", fetch_context(url), response.status());
        }

        response.json().await.with_context(|| fetch_context(url))
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    async fn send_get_request(&self, url: &str) -> Result<reqwest::Response> {
        self.client
            .get(url)
            .send()
            .await
            .context("Failed to send GET request")
    }
}

fn is_retryable(status: StatusCode) -> bool {
    RETRY_STATUSES.contains(&status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(is_retryable(StatusCode::BAD_GATEWAY));
        assert!(is_retryable(StatusCode::GATEWAY_TIMEOUT));
        assert!(!is_retryable(StatusCode::SERVICE_UNAVAILABLE));
        assert!(!is_retryable(StatusCode::NOT_FOUND));
        assert!(!is_retryable(StatusCode::OK));
    }
}
