use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::RefreshStatus;
use crate::services::store::StoreError;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Append-only log of completed refreshes.
#[async_trait]
pub trait StatusRepository: Send + Sync {
    /// Appends a snapshot and returns its id.
    async fn record(&self, total_countries: i64, refreshed_at: DateTime<Utc>) -> Result<i64>;
    /// Most recent snapshot by timestamp, newest id on ties.
    async fn latest(&self) -> Result<Option<RefreshStatus>>;
}
