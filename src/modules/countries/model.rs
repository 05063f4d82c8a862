use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// =============================================================================
// COUNTRY
// =============================================================================

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<f64>,
    pub estimated_gdp: Option<f64>,
    pub flag_url: Option<String>,
    pub last_refreshed_at: DateTime<Utc>,
}

// =============================================================================
// COUNTRY DRAFT
// =============================================================================

/// Mutable fields of a country as produced by a refresh, before it is
/// matched against the store.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryDraft {
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<f64>,
    pub estimated_gdp: Option<f64>,
    pub flag_url: Option<String>,
}

impl CountryDraft {
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }
}

/// Normalized lookup key; every case-insensitive match goes through this.
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}
