use std::time::Duration;
use tokio::time::{Instant, sleep_until};

/// Keeps consecutive requests at least `delay` apart
pub struct RateLimiter {
    delay: Duration,
    last_request: Option<Instant>,
    request_count: usize,
}

impl RateLimiter {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            last_request: None,
            request_count: 0,
        }
    }

    pub async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            sleep_until(last + self.delay).await;
        }
        self.last_request = Some(Instant::now());
        self.request_count += 1;
    }

    pub fn request_count(&self) -> usize {
        self.request_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_request_is_not_delayed() {
        let mut limiter = RateLimiter::new(10_000);
        let start = Instant::now();

        limiter.wait().await;

        assert!(start.elapsed() < Duration::from_secs(1));
        assert_eq!(limiter.request_count(), 1);
    }

    #[tokio::test]
    async fn test_spaces_consecutive_requests() {
        let mut limiter = RateLimiter::new(20);
        let start = Instant::now();

        limiter.wait().await;
        limiter.wait().await;
        limiter.wait().await;

        assert!(start.elapsed() >= Duration::from_millis(40));
        assert_eq!(limiter.request_count(), 3);
    }
}
