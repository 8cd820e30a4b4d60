pub mod config;
pub mod error;
pub mod handlers;
pub mod pricing;
pub mod render;
pub mod server;
pub mod signals;
pub mod static_files;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ServerConfig;

/// Initialize tracing/logging
///
/// `RUST_LOG` wins over the configured level. Can only be called once.
pub fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if server.log_format == "json" {
        registry.with(fmt::layer().json().with_target(true)).init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}
