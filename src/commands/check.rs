use anyhow::Result;
use colored::Colorize;
use runner_prices::config;
use std::path::Path;
use tracing::info;

/// Execute the check command
///
/// This validates the configuration file without starting the server
pub fn execute(path: &Path) -> Result<()> {
    println!("Checking configuration {}...", path.display());
    info!("Loading and validating configuration");

    let cfg = config::load_config(path)?;

    println!("{}", "✓ Configuration check successful".green());
    println!();

    println!("Configuration Summary:");
    println!("  Server: {}:{}", cfg.server.host, cfg.server.port);
    println!("  Log Level: {}", cfg.server.log_level);
    println!("  Log Format: {}", cfg.server.log_format);
    println!();

    println!("  Source: {}", cfg.source.location);
    println!("    Timeout: {}s", cfg.source.timeout_seconds);
    match cfg.source.refresh_interval() {
        Some(interval) => println!("    Refresh: every {}s", interval.as_secs()),
        None => println!("    Refresh: {}", "disabled"),
    }
    println!();

    println!("  Page Title: {}", cfg.render.title);
    println!(
        "  Field Escaping: {}",
        if cfg.render.escape_html {
            "enabled".to_string()
        } else {
            "disabled (raw markup)".yellow().to_string()
        }
    );

    println!();
    println!("Effective Configuration:");
    println!("{}", toml::to_string_pretty(&cfg)?);

    info!("Configuration check completed successfully");
    Ok(())
}
