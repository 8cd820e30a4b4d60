pub mod api;
pub mod health;
pub mod page;

use crate::config::Config;
use crate::pricing::RunnerTableService;
use std::sync::Arc;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub service: Arc<RunnerTableService>,
}

impl AppState {
    pub fn new(config: Config, service: Arc<RunnerTableService>) -> Self {
        Self {
            config: Arc::new(config),
            service,
        }
    }
}
