//! Configuration options for the retrier

use std::time::Duration;

/// Controls how many attempts are made and how long to wait between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of times the operation is invoked, including the first attempt.
    /// Zero performs no attempts and yields [`crate::retry::RetryError::MaxRetriesExceeded`].
    ///
    /// Default 5
    pub max_attempts: u32,
    /// Upper bound on the exponential part of the delay between attempts.
    /// Up to one second of jitter is added on top of this.
    ///
    /// Default 30s
    pub max_backoff: Duration,
}

impl RetryConfig {
    pub fn new(max_attempts: u32, max_backoff: Duration) -> Self {
        Self {
            max_attempts,
            max_backoff,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            max_backoff: Duration::from_secs(30),
        }
    }
}
