//! Retry loops with capped exponential backoff and jitter.

pub mod config;
pub mod error;
pub mod observer;
mod retrier;

pub use config::RetryConfig;
pub use error::RetryError;
pub use observer::{RetryEvent, RetryObserver, TracingObserver};
pub use retrier::{retry_with_backoff, retry_with_backoff_blocking, Retrier};
