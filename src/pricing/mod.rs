pub mod calculator;
pub mod loader;
pub mod models;
pub mod service;
pub mod updater;

pub use calculator::{parse_minutes, PriceCalculator};
pub use loader::{fetch_resource, load_table, parse_runner_csv, ResourceLocation};
pub use models::{LoadState, PriceCell, RunnerRow, RunnerTable};
pub use service::{RunnerTableService, TableSnapshot};
pub use updater::TableUpdater;
