use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use runner_prices::{config, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    match args.get_command() {
        cli::Commands::Version => {
            println!("runner-prices v{}", env!("CARGO_PKG_VERSION"));
            println!("Rust {}", env!("CARGO_PKG_RUST_VERSION"));
        }
        cli::Commands::Check => {
            init_tracing(&config::ServerConfig::default());
            commands::check::execute(&args.config)?;
        }
        command => {
            let cfg = config::load_config(&args.config)?;
            init_tracing(&cfg.server);

            match command {
                cli::Commands::Render { minutes, output } => {
                    commands::render::execute(&cfg, minutes.as_deref(), output.as_deref()).await?;
                }
                cli::Commands::Calculate { minutes } => {
                    commands::calculate::execute(&cfg, &minutes).await?;
                }
                _ => commands::serve::execute(cfg).await?,
            }
        }
    }

    Ok(())
}
