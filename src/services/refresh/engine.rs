use chrono::{DateTime, Utc};
use rand::Rng;
use std::ops::Range;

use crate::modules::countries::interface::{CountryRepository, UpsertOutcome};
use crate::modules::countries::model::CountryDraft;
use crate::services::gateway::{RateTable, RawCountry};
use crate::services::store::StoreError;

/// Drawn fresh for every record on every refresh.
pub const GDP_MULTIPLIER_RANGE: Range<f64> = 1000.0..2000.0;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub created: u64,
    pub updated: u64,
}

/// Turns one catalog entry into a draft, or `None` when the entry has no
/// usable name or no population.
pub fn normalize<R: Rng>(raw: &RawCountry, rates: &RateTable, rng: &mut R) -> Option<CountryDraft> {
    let name = raw.name.as_deref().filter(|n| !n.trim().is_empty())?;
    let population = raw.population?;

    let currency_code = raw
        .currencies
        .as_ref()
        .and_then(|list| list.first())
        .and_then(|c| c.code.clone());

    let mut exchange_rate = None;
    let mut estimated_gdp = 0.0;

    if let Some(rate) = currency_code.as_ref().and_then(|code| rates.get(code)).copied() {
        exchange_rate = Some(rate);
        let multiplier = rng.random_range(GDP_MULTIPLIER_RANGE);
        if rate > 0.0 {
            estimated_gdp = population as f64 * multiplier / rate;
        }
    }

    Some(CountryDraft {
        name: name.to_string(),
        capital: raw.capital.clone(),
        region: raw.region.clone(),
        population,
        currency_code,
        exchange_rate,
        estimated_gdp: Some(estimated_gdp),
        flag_url: raw.flag.clone(),
    })
}

/// Normalizes a whole catalog. Returns the drafts and how many entries were
/// skipped.
pub fn prepare<R: Rng>(
    raw: &[RawCountry],
    rates: &RateTable,
    rng: &mut R,
) -> (Vec<CountryDraft>, u64) {
    let mut skipped = 0;
    let drafts = raw
        .iter()
        .filter_map(|entry| {
            let draft = normalize(entry, rates, rng);
            if draft.is_none() {
                skipped += 1;
                tracing::debug!("Skipping country without name or population: {:?}", entry.name);
            }
            draft
        })
        .collect();

    (drafts, skipped)
}

/// Upserts every draft in order. A store failure stops the loop but keeps
/// whatever was already written.
pub async fn reconcile(
    repo: &dyn CountryRepository,
    drafts: &[CountryDraft],
    refreshed_at: DateTime<Utc>,
) -> Result<ReconcileSummary, StoreError> {
    let mut summary = ReconcileSummary::default();

    for draft in drafts {
        match repo.upsert(draft, refreshed_at).await? {
            UpsertOutcome::Created => summary.created += 1,
            UpsertOutcome::Updated => summary.updated += 1,
        }
    }

    Ok(summary)
}
