use std::{future::Future, ops::ControlFlow, time::Duration};

use tokio_util::sync::CancellationToken;

use crate::backoff::exponential_backoff;

use super::{
    config::RetryConfig,
    error::RetryError,
    observer::{RetryEvent, RetryObserver, TracingObserver},
};

/// Runs an operation until it succeeds or its attempt budget is spent.
///
/// Attempts are strictly sequential. After a failed attempt `i` (0-based) that is not the last, the retrier waits
/// `min(2^i s, max_backoff)` plus up to a second of jitter. The last attempt's error is returned without waiting.
///
/// A `Retrier` holds no mutable state and can be shared between concurrent callers.
#[derive(Debug, Clone)]
pub struct Retrier<O = TracingObserver> {
    config: RetryConfig,
    observer: O,
}

impl Retrier {
    pub fn new(config: RetryConfig) -> Self {
        Self {
            config,
            observer: TracingObserver,
        }
    }
}

impl Default for Retrier {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}

impl<O> Retrier<O> {
    /// Replace the observer that receives retry and exhaustion events.
    pub fn with_observer<P>(self, observer: P) -> Retrier<P> {
        Retrier {
            config: self.config,
            observer,
        }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Retry an async operation, sleeping on the tokio timer between attempts.
    pub async fn retry<F, Fut, T, E>(&self, operation: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        O: RetryObserver<E>,
    {
        // never cancelled, so this can only end in success, the last error or the sentinel
        self.retry_until_cancelled(operation, &CancellationToken::new())
            .await
    }

    /// Like [`Retrier::retry`], but gives up with [`RetryError::Cancelled`] if `token` is cancelled while waiting
    /// between attempts. A running attempt is never interrupted.
    pub async fn retry_until_cancelled<F, Fut, T, E>(
        &self,
        mut operation: F,
        token: &CancellationToken,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        O: RetryObserver<E>,
    {
        for attempt in 0..self.config.max_attempts {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => match self.on_failure(attempt, err) {
                    ControlFlow::Continue(delay) => {
                        tokio::select! {
                            biased;
                            _ = token.cancelled() => {
                                self.observer.notify(&RetryEvent::Cancelled { attempt: attempt + 1 });
                                return Err(RetryError::Cancelled);
                            }
                            _ = tokio::time::sleep(delay) => {}
                        }
                    }
                    ControlFlow::Break(err) => return Err(err),
                },
            }
        }

        Err(RetryError::MaxRetriesExceeded)
    }

    /// Retry a synchronous operation, parking the calling thread between attempts.
    ///
    /// Do not call this from an async task; use [`Retrier::retry`] instead.
    pub fn retry_blocking<F, T, E>(&self, mut operation: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Result<T, E>,
        O: RetryObserver<E>,
    {
        for attempt in 0..self.config.max_attempts {
            match operation() {
                Ok(value) => return Ok(value),
                Err(err) => match self.on_failure(attempt, err) {
                    ControlFlow::Continue(delay) => std::thread::sleep(delay),
                    ControlFlow::Break(err) => return Err(err),
                },
            }
        }

        Err(RetryError::MaxRetriesExceeded)
    }

    /// Decide what follows a failed attempt: wait `delay` and go again, or stop with the final error.
    fn on_failure<E>(&self, attempt: u32, err: E) -> ControlFlow<RetryError<E>, Duration>
    where
        O: RetryObserver<E>,
    {
        let max_attempts = self.config.max_attempts;

        if attempt + 1 >= max_attempts {
            self.observer.notify(&RetryEvent::Exhausted {
                attempts: attempt + 1,
                error: &err,
            });
            return ControlFlow::Break(RetryError::Operation(err));
        }

        let delay = exponential_backoff(attempt, self.config.max_backoff, &mut rand::thread_rng());

        self.observer.notify(&RetryEvent::Retrying {
            attempt: attempt + 1,
            max_attempts,
            delay,
            error: &err,
        });

        ControlFlow::Continue(delay)
    }
}

/// Retry `operation` up to `max_attempts` times with capped exponential backoff and jitter, logging through
/// `tracing`.
///
/// Returns the first success, or the error of the final attempt. With `max_attempts == 0` the operation is never
/// called and [`RetryError::MaxRetriesExceeded`] is returned.
pub async fn retry_with_backoff<F, Fut, T, E>(
    operation: F,
    max_attempts: u32,
    max_backoff: Duration,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Debug,
{
    Retrier::new(RetryConfig::new(max_attempts, max_backoff))
        .retry(operation)
        .await
}

/// Blocking counterpart of [`retry_with_backoff`].
pub fn retry_with_backoff_blocking<F, T, E>(
    operation: F,
    max_attempts: u32,
    max_backoff: Duration,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Result<T, E>,
    E: std::fmt::Debug,
{
    Retrier::new(RetryConfig::new(max_attempts, max_backoff)).retry_blocking(operation)
}
