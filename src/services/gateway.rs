use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::config::Config;

// =============================================================================
// UPSTREAM PAYLOADS
// =============================================================================

/// One entry of the countries catalog. Every field is optional upstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCountry {
    pub name: Option<String>,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: Option<i64>,
    pub flag: Option<String>,
    pub currencies: Option<Vec<RawCurrency>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCurrency {
    pub code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExchangeRatesPayload {
    #[serde(default)]
    rates: RateTable,
}

/// Currency code -> units of that currency per 1 USD.
pub type RateTable = HashMap<String, f64>;

#[derive(Debug, Clone, Default)]
pub struct UpstreamData {
    pub countries: Vec<RawCountry>,
    pub rates: RateTable,
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    Countries,
    Exchange,
}

impl Upstream {
    /// Short label used for metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Upstream::Countries => "countries",
            Upstream::Exchange => "exchange",
        }
    }
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Upstream::Countries => write!(f, "Countries API"),
            Upstream::Exchange => write!(f, "Exchange Rates API"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{upstream} request failed: {reason}")]
pub struct GatewayError {
    pub upstream: Upstream,
    pub reason: String,
}

impl GatewayError {
    pub fn new(upstream: Upstream, reason: impl Into<String>) -> Self {
        Self {
            upstream,
            reason: reason.into(),
        }
    }
}

// =============================================================================
// GATEWAY
// =============================================================================

#[async_trait]
pub trait CountryDataGateway: Send + Sync {
    /// Fetches the countries catalog, then the USD exchange table.
    /// Either failure aborts the whole fetch.
    async fn fetch(&self) -> Result<UpstreamData, GatewayError>;
}

/// Pulls both upstreams over HTTP with a per-request timeout.
pub struct HttpGateway {
    client: Client,
    countries_url: String,
    exchange_url: String,
}

impl HttpGateway {
    pub fn new(
        countries_url: impl Into<String>,
        exchange_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            countries_url: countries_url.into(),
            exchange_url: exchange_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(
            config.countries_api_url.clone(),
            config.exchange_api_url.clone(),
            config.http_timeout,
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, upstream: Upstream) -> Result<T, GatewayError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GatewayError::new(upstream, e.to_string()))?;

        if !response.status().is_success() {
            return Err(GatewayError::new(
                upstream,
                format!("API returned status: {}", response.status()),
            ));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::new(upstream, format!("Parse error: {}", e)))
    }
}

#[async_trait]
impl CountryDataGateway for HttpGateway {
    async fn fetch(&self) -> Result<UpstreamData, GatewayError> {
        let countries: Vec<RawCountry> = self
            .get_json(&self.countries_url, Upstream::Countries)
            .await?;
        tracing::debug!("Fetched {} countries from {}", countries.len(), Upstream::Countries);

        let payload: ExchangeRatesPayload = self
            .get_json(&self.exchange_url, Upstream::Exchange)
            .await?;
        tracing::debug!("Fetched {} exchange rates from {}", payload.rates.len(), Upstream::Exchange);

        Ok(UpstreamData {
            countries,
            rates: payload.rates,
        })
    }
}
