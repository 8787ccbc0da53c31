//! Diagnostic hooks for retry loops.
//!
//! Notifications are a side channel: they cannot influence whether or when the next attempt runs.

use std::{fmt, time::Duration};

/// Something noteworthy happened inside a retry loop.
#[derive(Debug)]
pub enum RetryEvent<'a, E> {
    /// An attempt failed and the next one is scheduled after `delay`.
    Retrying {
        /// 1-based number of the attempt that just failed
        attempt: u32,
        max_attempts: u32,
        /// Capped exponential delay plus jitter
        delay: Duration,
        error: &'a E,
    },
    /// The last permitted attempt failed; `error` is about to be returned.
    Exhausted { attempts: u32, error: &'a E },
    /// The loop was cancelled while waiting before attempt `attempt + 1`.
    Cancelled { attempt: u32 },
}

/// Receives [`RetryEvent`]s from a [`crate::retry::Retrier`].
///
/// Implemented for any `Fn(&RetryEvent<E>)`, so a closure can be passed directly.
pub trait RetryObserver<E> {
    fn notify(&self, event: &RetryEvent<'_, E>);
}

impl<E, F> RetryObserver<E> for F
where
    F: Fn(&RetryEvent<'_, E>),
{
    fn notify(&self, event: &RetryEvent<'_, E>) {
        self(event)
    }
}

/// Default observer, emits `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl<E: fmt::Debug> RetryObserver<E> for TracingObserver {
    fn notify(&self, event: &RetryEvent<'_, E>) {
        match event {
            RetryEvent::Retrying {
                attempt,
                max_attempts,
                delay,
                error,
            } => tracing::warn!(
                attempt,
                max_attempts,
                delay_ms = delay.as_millis() as u64,
                "attempt failed: {error:?}, retrying in {delay:?}"
            ),
            RetryEvent::Exhausted { attempts, error } => {
                tracing::error!(attempts, "max retries exceeded: {error:?}")
            }
            RetryEvent::Cancelled { attempt } => {
                tracing::info!(attempt, "retry loop cancelled while backing off")
            }
        }
    }
}
