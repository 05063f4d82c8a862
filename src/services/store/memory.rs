use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::modules::countries::interface::{
    CountryFilter, CountryRepository, GdpSort, Result, UpsertOutcome,
};
use crate::modules::countries::model::{name_key, Country, CountryDraft};
use crate::modules::status::interface::StatusRepository;
use crate::modules::status::model::RefreshStatus;

/// Process-local store backing both repositories.
///
/// Countries are kept in id order, which is the store order every unsorted
/// listing follows; `by_name` is the lowercased-name index.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    countries: BTreeMap<i64, Country>,
    by_name: HashMap<String, i64>,
    next_country_id: i64,
    statuses: Vec<RefreshStatus>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// NULL sorts below every value.
fn compare_gdp(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.total_cmp(&y),
    }
}

#[async_trait]
impl CountryRepository for InMemoryStore {
    async fn upsert(&self, draft: &CountryDraft, refreshed_at: DateTime<Utc>) -> Result<UpsertOutcome> {
        let mut inner = self.inner.write().await;
        let key = draft.name_key();

        let existing = inner.by_name.get(&key).copied();
        let (id, outcome) = match existing {
            Some(id) => (id, UpsertOutcome::Updated),
            None => {
                inner.next_country_id += 1;
                (inner.next_country_id, UpsertOutcome::Created)
            }
        };

        inner.by_name.insert(key, id);
        inner.countries.insert(
            id,
            Country {
                id,
                name: draft.name.clone(),
                capital: draft.capital.clone(),
                region: draft.region.clone(),
                population: draft.population,
                currency_code: draft.currency_code.clone(),
                exchange_rate: draft.exchange_rate,
                estimated_gdp: draft.estimated_gdp,
                flag_url: draft.flag_url.clone(),
                last_refreshed_at: refreshed_at,
            },
        );

        Ok(outcome)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Country>> {
        let inner = self.inner.read().await;
        Ok(inner
            .by_name
            .get(&name_key(name))
            .and_then(|id| inner.countries.get(id))
            .cloned())
    }

    async fn list(&self, filter: &CountryFilter) -> Result<Vec<Country>> {
        let inner = self.inner.read().await;
        let mut countries: Vec<Country> = inner
            .countries
            .values()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();

        // sort_by is stable, so ties keep id order.
        match filter.sort {
            GdpSort::Desc => {
                countries.sort_by(|a, b| compare_gdp(b.estimated_gdp, a.estimated_gdp))
            }
            GdpSort::Asc => {
                countries.sort_by(|a, b| compare_gdp(a.estimated_gdp, b.estimated_gdp))
            }
            GdpSort::None => {}
        }

        Ok(countries)
    }

    async fn delete_by_name(&self, name: &str) -> Result<bool> {
        let mut inner = self.inner.write().await;
        match inner.by_name.remove(&name_key(name)) {
            Some(id) => {
                inner.countries.remove(&id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.inner.read().await.countries.len() as i64)
    }

    async fn top_by_gdp(&self, limit: usize) -> Result<Vec<Country>> {
        let inner = self.inner.read().await;
        let mut ranked: Vec<&Country> = inner
            .countries
            .values()
            .filter(|c| c.estimated_gdp.is_some())
            .collect();
        ranked.sort_by(|a, b| compare_gdp(b.estimated_gdp, a.estimated_gdp));

        Ok(ranked.into_iter().take(limit).cloned().collect())
    }
}

#[async_trait]
impl StatusRepository for InMemoryStore {
    async fn record(&self, total_countries: i64, refreshed_at: DateTime<Utc>) -> Result<i64> {
        let mut inner = self.inner.write().await;
        let id = inner.statuses.len() as i64 + 1;
        inner.statuses.push(RefreshStatus {
            id,
            total_countries,
            last_refreshed_at: refreshed_at,
        });
        Ok(id)
    }

    async fn latest(&self) -> Result<Option<RefreshStatus>> {
        let inner = self.inner.read().await;
        Ok(inner
            .statuses
            .iter()
            .max_by(|a, b| {
                a.last_refreshed_at
                    .cmp(&b.last_refreshed_at)
                    .then(a.id.cmp(&b.id))
            })
            .cloned())
    }
}
