//! Seedwave REST server: router, handlers and startup configuration.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

/// Install the fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,seedwave_server=debug,tower_http=info".into()),
        )
        .init();
}
