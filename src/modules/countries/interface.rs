use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{Country, CountryDraft};
use crate::services::store::StoreError;

// =============================================================================
// REPOSITORY TRAITS
// =============================================================================

pub type Result<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait CountryRepository: Send + Sync {
    /// Insert or overwrite the country whose normalized name matches `draft.name`.
    async fn upsert(&self, draft: &CountryDraft, refreshed_at: DateTime<Utc>) -> Result<UpsertOutcome>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Country>>;
    async fn list(&self, filter: &CountryFilter) -> Result<Vec<Country>>;
    /// Returns false when no country matched.
    async fn delete_by_name(&self, name: &str) -> Result<bool>;
    async fn count(&self) -> Result<i64>;
    /// Countries with a known estimated GDP, highest first, store order on ties.
    async fn top_by_gdp(&self, limit: usize) -> Result<Vec<Country>>;
}

// =============================================================================
// QUERY TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GdpSort {
    #[default]
    None,
    Desc,
    Asc,
}

impl GdpSort {
    /// Unknown values fall back to store order.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("gdp_desc") => Self::Desc,
            Some("gdp_asc") => Self::Asc,
            _ => Self::None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CountryFilter {
    pub region: Option<String>,
    pub currency: Option<String>,
    pub sort: GdpSort,
}

impl CountryFilter {
    pub fn matches(&self, country: &Country) -> bool {
        eq_ignore_case(self.region.as_deref(), country.region.as_deref())
            && eq_ignore_case(self.currency.as_deref(), country.currency_code.as_deref())
    }
}

fn eq_ignore_case(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match (wanted, actual) {
        (None, _) => true,
        (Some(w), Some(a)) => w.to_lowercase() == a.to_lowercase(),
        (Some(_), None) => false,
    }
}
