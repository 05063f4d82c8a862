use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, Pool, QueryBuilder};

use super::interface::{CountryFilter, CountryRepository, GdpSort, Result, UpsertOutcome};
use super::model::{name_key, Country, CountryDraft};

const COUNTRY_COLUMNS: &str = "id, name, capital, region, population, currency_code, \
     exchange_rate, estimated_gdp, flag_url, last_refreshed_at";

// =============================================================================
// COUNTRY CRUD (MySQL)
// =============================================================================

pub struct CountryCrud {
    pool: Pool<MySql>,
}

impl CountryCrud {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CountryRepository for CountryCrud {
    async fn upsert(&self, draft: &CountryDraft, refreshed_at: DateTime<Utc>) -> Result<UpsertOutcome> {
        let key = draft.name_key();

        let existing: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM countries WHERE name_key = ? LIMIT 1")
                .bind(&key)
                .fetch_optional(&self.pool)
                .await?;

        if let Some((existing_id,)) = existing {
            sqlx::query(
                r#"
                UPDATE countries SET
                    name = ?,
                    name_key = ?,
                    capital = ?,
                    region = ?,
                    population = ?,
                    currency_code = ?,
                    exchange_rate = ?,
                    estimated_gdp = ?,
                    flag_url = ?,
                    last_refreshed_at = ?
                WHERE id = ?
                "#,
            )
            .bind(&draft.name)
            .bind(&key)
            .bind(&draft.capital)
            .bind(&draft.region)
            .bind(draft.population)
            .bind(&draft.currency_code)
            .bind(draft.exchange_rate)
            .bind(draft.estimated_gdp)
            .bind(&draft.flag_url)
            .bind(refreshed_at)
            .bind(existing_id)
            .execute(&self.pool)
            .await?;

            return Ok(UpsertOutcome::Updated);
        }

        sqlx::query(
            r#"
            INSERT INTO countries (
                name, name_key, capital, region, population, currency_code,
                exchange_rate, estimated_gdp, flag_url, last_refreshed_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&draft.name)
        .bind(&key)
        .bind(&draft.capital)
        .bind(&draft.region)
        .bind(draft.population)
        .bind(&draft.currency_code)
        .bind(draft.exchange_rate)
        .bind(draft.estimated_gdp)
        .bind(&draft.flag_url)
        .bind(refreshed_at)
        .execute(&self.pool)
        .await?;

        Ok(UpsertOutcome::Created)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Country>> {
        let sql = format!("SELECT {} FROM countries WHERE name_key = ? LIMIT 1", COUNTRY_COLUMNS);
        let country = sqlx::query_as::<_, Country>(&sql)
            .bind(name_key(name))
            .fetch_optional(&self.pool)
            .await?;

        Ok(country)
    }

    async fn list(&self, filter: &CountryFilter) -> Result<Vec<Country>> {
        let mut builder: QueryBuilder<MySql> =
            QueryBuilder::new(format!("SELECT {} FROM countries WHERE 1 = 1", COUNTRY_COLUMNS));

        if let Some(ref region) = filter.region {
            builder.push(" AND LOWER(region) = ").push_bind(region.to_lowercase());
        }

        if let Some(ref currency) = filter.currency {
            builder.push(" AND LOWER(currency_code) = ").push_bind(currency.to_lowercase());
        }

        // MySQL sorts NULL below every value, matching the in-memory store.
        builder.push(match filter.sort {
            GdpSort::Desc => " ORDER BY estimated_gdp DESC, id ASC",
            GdpSort::Asc => " ORDER BY estimated_gdp ASC, id ASC",
            GdpSort::None => " ORDER BY id ASC",
        });

        let countries = builder
            .build_query_as::<Country>()
            .fetch_all(&self.pool)
            .await?;

        Ok(countries)
    }

    async fn delete_by_name(&self, name: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM countries WHERE name_key = ?")
            .bind(name_key(name))
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM countries")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn top_by_gdp(&self, limit: usize) -> Result<Vec<Country>> {
        let sql = format!(
            "SELECT {} FROM countries WHERE estimated_gdp IS NOT NULL \
             ORDER BY estimated_gdp DESC, id ASC LIMIT ?",
            COUNTRY_COLUMNS
        );
        let countries = sqlx::query_as::<_, Country>(&sql)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(countries)
    }
}
