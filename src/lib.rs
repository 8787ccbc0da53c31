//! Retry fallible operations with capped exponential backoff and jitter.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use retry_backoff::retry_with_backoff;
//! use tokio::net::TcpStream;
//!
//! # async fn connect() -> Result<(), Box<dyn std::error::Error>> {
//! let stream = retry_with_backoff(
//!     || TcpStream::connect("127.0.0.1:9092"),
//!     5,
//!     Duration::from_secs(30),
//! )
//! .await?;
//! # drop(stream);
//! # Ok(())
//! # }
//! ```

pub mod backoff;
pub mod retry;

pub use retry::{
    retry_with_backoff, retry_with_backoff_blocking, Retrier, RetryConfig, RetryError,
    RetryEvent, RetryObserver, TracingObserver,
};
