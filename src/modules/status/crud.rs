use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, Pool};

use super::interface::{Result, StatusRepository};
use super::model::RefreshStatus;

pub struct StatusCrud {
    pool: Pool<MySql>,
}

impl StatusCrud {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatusRepository for StatusCrud {
    async fn record(&self, total_countries: i64, refreshed_at: DateTime<Utc>) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO refresh_status (total_countries, last_refreshed_at) VALUES (?, ?)",
        )
        .bind(total_countries)
        .bind(refreshed_at)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id() as i64)
    }

    async fn latest(&self) -> Result<Option<RefreshStatus>> {
        let status = sqlx::query_as::<_, RefreshStatus>(
            r#"
            SELECT id, total_countries, last_refreshed_at
            FROM refresh_status
            ORDER BY last_refreshed_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(status)
    }
}
