use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use runner_prices::{
    config::Config,
    pricing::{load_table, PriceCalculator, RunnerTable},
    render::PRICE_COLUMN_TITLE,
};

/// Execute the calculate command
///
/// Validates `minutes` before fetching anything.
pub async fn execute(cfg: &Config, minutes: &str) -> Result<()> {
    let calculator = PriceCalculator::from_input(minutes)?;

    let (mut table, _) = load_table(&cfg.source).await?;
    calculator.apply(&mut table);

    println!("Runner prices for {} minutes", calculator.minutes());
    println!("{}", build_table(&table));

    Ok(())
}

fn build_table(runners: &RunnerTable) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header: Vec<Cell> = runners.headers().iter().map(Cell::new).collect();
    header.push(Cell::new(PRICE_COLUMN_TITLE));
    table.set_header(header);

    for row in runners.rows() {
        let mut cells: Vec<Cell> = row.fields().iter().map(Cell::new).collect();
        cells.push(Cell::new(row.price().computed_price()));
        table.add_row(cells);
    }

    table
}
