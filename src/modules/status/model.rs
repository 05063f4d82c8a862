use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct RefreshStatus {
    pub id: i64,
    pub total_countries: i64,
    pub last_refreshed_at: DateTime<Utc>,
}
