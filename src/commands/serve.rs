use anyhow::Result;
use colored::Colorize;
use runner_prices::{config::Config, server};
use tracing::info;

/// Execute the serve command
///
/// Blocks until the server shuts down.
pub async fn execute(cfg: Config) -> Result<()> {
    println!("{}", "Starting runner prices server...".green());
    info!(
        "Starting runner prices server on {}:{}",
        cfg.server.host, cfg.server.port
    );

    server::start_server(cfg).await?;

    Ok(())
}
