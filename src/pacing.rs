//! Request pacing.
//!
//! DuckDuckGo blocks clients that hit its JSON endpoints too quickly. The
//! client waits a fixed interval after each request kind; the waiting is
//! behind a trait so tests can run without delays.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::PacingConfig;

/// Point in an operation after which the client may wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaceStep {
    /// After the bootstrap token request.
    Token,
    /// After each web results page.
    TextPage,
    /// After each image results page.
    ImagePage,
    /// After each news results page.
    NewsPage,
    /// After each place-search box.
    PlaceBox,
    /// After each translated string.
    Translation,
}

/// Decides how long to wait between requests.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Waits as required after `step`.
    async fn pace(&self, step: PaceStep);
}

/// Sleeps for a configured duration per step.
#[derive(Debug, Clone, Default)]
pub struct FixedInterval {
    intervals: PacingConfig,
}

impl FixedInterval {
    pub fn new(intervals: PacingConfig) -> Self {
        Self { intervals }
    }

    /// Returns the delay for a step.
    pub fn delay(&self, step: PaceStep) -> Duration {
        self.intervals.delay(step)
    }
}

#[async_trait]
impl RateLimiter for FixedInterval {
    async fn pace(&self, step: PaceStep) {
        let delay = self.delay(step);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unpaced;

#[async_trait]
impl RateLimiter for Unpaced {
    async fn pace(&self, _step: PaceStep) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_fixed_interval_uses_config() {
        let limiter = FixedInterval::new(PacingConfig::default());
        assert_eq!(limiter.delay(PaceStep::Token), Duration::from_millis(750));
        assert_eq!(limiter.delay(PaceStep::PlaceBox), Duration::ZERO);
    }

    #[test]
    fn test_unpaced_returns_immediately() {
        let start = Instant::now();
        tokio_test::block_on(Unpaced.pace(PaceStep::Token));
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_fixed_interval_sleeps() {
        let pacing = PacingConfig {
            news_page_ms: 20,
            ..PacingConfig::none()
        };
        let limiter = FixedInterval::new(pacing);
        let start = Instant::now();
        limiter.pace(PaceStep::NewsPage).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_fixed_interval_zero_delay_skips_sleep() {
        let limiter = FixedInterval::new(PacingConfig::none());
        let start = Instant::now();
        limiter.pace(PaceStep::TextPage).await;
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
