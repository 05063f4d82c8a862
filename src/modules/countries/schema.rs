use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::interface::{CountryFilter, GdpSort};

// =============================================================================
// LIST
// =============================================================================

// Query parameters for GET /countries/
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CountriesQuery {
    pub region: Option<String>,   // Case-insensitive exact match
    pub currency: Option<String>, // Case-insensitive match on currency_code
    pub sort: Option<String>,     // gdp_desc | gdp_asc, anything else keeps store order
}

impl CountriesQuery {
    /// Blank parameters (`?region=`) are ignored.
    pub fn into_filter(self) -> CountryFilter {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        CountryFilter {
            sort: GdpSort::parse(self.sort.as_deref()),
            region: present(self.region),
            currency: present(self.currency),
        }
    }
}

// =============================================================================
// REFRESH
// =============================================================================

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub message: &'static str,
    pub total: i64,
    pub updated: u64,
    #[serde(rename = "new")]
    pub created: u64,
    pub last_refreshed_at: DateTime<Utc>,
}
