use anyhow::{Context, Result};
use runner_prices::{
    config::Config,
    pricing::{load_table, LoadState, PriceCalculator},
    render::{render_page, PageView},
};
use std::path::Path;
use tracing::info;

/// Execute the render command
///
/// Loads the runner prices once, applies `minutes` if given and writes the
/// page to `output` or stdout.
pub async fn execute(cfg: &Config, minutes: Option<&str>, output: Option<&Path>) -> Result<()> {
    let calculator = minutes.map(PriceCalculator::from_input).transpose()?;

    let (mut table, content_hash) = load_table(&cfg.source).await?;
    if let Some(calculator) = &calculator {
        calculator.apply(&mut table);
    }

    let state = LoadState::Loaded {
        loaded_at: chrono::Utc::now(),
        content_hash,
    };
    let page = render_page(&PageView {
        title: &cfg.render.title,
        state: &state,
        table: &table,
        minutes,
        notice: None,
        escape_fields: cfg.render.escape_html,
    })?;

    match output {
        Some(path) => {
            tokio::fs::write(path, &page)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} runner rows to {}", table.len(), path.display());
        }
        None => println!("{}", page),
    }

    Ok(())
}
