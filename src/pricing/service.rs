use crate::pricing::models::{LoadState, RunnerTable};
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Point-in-time copy of the shared table
#[derive(Debug, Clone)]
pub struct TableSnapshot {
    pub state: LoadState,
    pub table: RunnerTable,
}

/// Service owning the runner table and its load state
///
/// Readers get a copy; calculations run on that copy so one user's minutes
/// never leak into another user's view.
pub struct RunnerTableService {
    inner: RwLock<TableSnapshot>,
}

impl Default for RunnerTableService {
    fn default() -> Self {
        Self::new()
    }
}

impl RunnerTableService {
    /// Create an empty service waiting for its first load
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(TableSnapshot {
                state: LoadState::Pending,
                table: RunnerTable::default(),
            }),
        }
    }

    pub async fn snapshot(&self) -> TableSnapshot {
        self.inner.read().await.clone()
    }

    pub async fn state(&self) -> LoadState {
        self.inner.read().await.state.clone()
    }

    /// Install a freshly parsed table
    pub async fn replace(&self, table: RunnerTable, content_hash: String) {
        let mut inner = self.inner.write().await;
        info!("Loaded {} runner rows into table", table.len());
        inner.table = table;
        inner.state = LoadState::Loaded {
            loaded_at: Utc::now(),
            content_hash,
        };
    }

    /// Record a failed load
    ///
    /// Rows from an earlier successful load are kept.
    pub async fn mark_failed(&self, reason: impl Into<String>) {
        let reason = reason.into();
        let mut inner = self.inner.write().await;
        warn!(
            rows_kept = inner.table.len(),
            "Runner prices unavailable: {}", reason
        );
        inner.state = LoadState::Failed {
            failed_at: Utc::now(),
            reason,
        };
    }

    /// Hash of the content behind the current table, if one was loaded
    pub async fn content_hash(&self) -> Option<String> {
        match &self.inner.read().await.state {
            LoadState::Loaded { content_hash, .. } => Some(content_hash.clone()),
            _ => None,
        }
    }
}
