//! webserv - single-client HTTP server
//!
//! Core library for connection framing, request parsing, routing and
//! frame relaying.

pub mod config;
pub mod http;
pub mod proxy;
pub mod server;

/// Sets up `tracing` output for the binaries; `RUST_LOG` overrides the
/// default `info` level.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();
}
