use chrono::{DateTime, Utc};
use serde::Serialize;

use super::model::RefreshStatus;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub total_countries: i64,
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

impl From<Option<RefreshStatus>> for StatusResponse {
    fn from(status: Option<RefreshStatus>) -> Self {
        match status {
            Some(s) => Self {
                total_countries: s.total_countries,
                last_refreshed_at: Some(s.last_refreshed_at),
            },
            None => Self {
                total_countries: 0,
                last_refreshed_at: None,
            },
        }
    }
}
