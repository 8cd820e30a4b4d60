use crate::error::AppError;
use crate::pricing::loader::{calculate_hash, fetch_resource, parse_runner_csv, ResourceLocation};
use crate::pricing::service::RunnerTableService;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Fetches the runner prices in the background and keeps the table current
pub struct TableUpdater {
    service: Arc<RunnerTableService>,
    location: ResourceLocation,
    fetch_timeout: Duration,
    refresh_interval: Option<Duration>,
}

impl TableUpdater {
    /// Create a new table updater
    ///
    /// `refresh_interval` of `None` means the resource is fetched once.
    pub fn new(
        service: Arc<RunnerTableService>,
        location: ResourceLocation,
        fetch_timeout: Duration,
        refresh_interval: Option<Duration>,
    ) -> Self {
        Self {
            service,
            location,
            fetch_timeout,
            refresh_interval,
        }
    }

    /// Start background task for the initial fetch and periodic refreshes
    pub async fn start_background_task(self: Arc<Self>) {
        info!("Starting runner prices loader for {}", self.location);

        self.run_once().await;

        let Some(period) = self.refresh_interval else {
            return;
        };

        info!("Refreshing runner prices every {:?}", period);
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // first tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;
            self.run_once().await;
        }
    }

    /// Run one update and record the outcome in the service
    pub async fn run_once(&self) {
        match self.check_and_update().await {
            Ok(true) => info!("Runner prices updated"),
            Ok(false) => info!("Runner prices unchanged (no update needed)"),
            Err(e) => {
                error!("Runner prices load failed: {}", e);
                self.service.mark_failed(e.to_string()).await;
            }
        }
    }

    /// Check for updates and apply if changed
    /// Returns true if the table was replaced, false if unchanged
    pub async fn check_and_update(&self) -> Result<bool, AppError> {
        let content = fetch_resource(&self.location, self.fetch_timeout).await?;
        let new_hash = calculate_hash(&content);

        if self.service.content_hash().await.as_deref() == Some(new_hash.as_str()) {
            return Ok(false);
        }

        let table = parse_runner_csv(&content)?;
        self.service.replace(table, new_hash).await;
        Ok(true)
    }
}
