use std::{io, time::Duration};

use clap::Parser;
use retry_backoff::{Retrier, RetryConfig};
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;

/// Connect to a TCP endpoint, retrying with capped exponential backoff.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Host to connect to
    host: String,
    /// Port to connect to
    port: u16,
    /// Maximum number of connection attempts
    #[arg(long, default_value_t = RetryConfig::default().max_attempts)]
    max_attempts: u32,
    /// Ceiling on the exponential delay between attempts, in seconds
    #[arg(long, default_value_t = 30)]
    max_backoff_secs: u64,
    /// Timeout for a single connection attempt, in seconds
    #[arg(long, default_value_t = 10)]
    connect_timeout_secs: u64,
    /// Set TCP_NODELAY on the established stream
    #[arg(long, default_value_t = false)]
    nodelay: bool,
}

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let retrier = Retrier::new(RetryConfig::new(
        args.max_attempts,
        Duration::from_secs(args.max_backoff_secs),
    ));
    let connect_timeout = Duration::from_secs(args.connect_timeout_secs);

    let token = CancellationToken::new();
    tokio::spawn({
        let token = token.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        }
    });

    let host = args.host.as_str();
    let port = args.port;

    let stream = retrier
        .retry_until_cancelled(
            || async move {
                tracing::info!(host, port, "connecting");
                match tokio::time::timeout(connect_timeout, TcpStream::connect((host, port))).await
                {
                    Ok(res) => res,
                    Err(_) => Err(io::Error::from(io::ErrorKind::TimedOut)),
                }
            },
            &token,
        )
        .await?;

    if let Err(err) = stream.set_nodelay(args.nodelay) {
        tracing::warn!("failed to set TCP_NODELAY={} on stream: {err:?}", args.nodelay);
    }

    println!("connected to {}", stream.peer_addr()?);

    Ok(())
}
