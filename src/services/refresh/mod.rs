pub mod engine;

use chrono::{DateTime, SubsecRound, Utc};
use tokio::sync::Mutex;

use crate::modules::countries::model::CountryDraft;
use crate::services::gateway::{CountryDataGateway, GatewayError};
use crate::services::metrics::collectors::{MetricsTimer, RefreshMetricsCollector};
use crate::services::store::{Store, StoreError};
use crate::services::summary::{GdpBar, SummaryRenderer};

/// How many countries the summary chart ranks.
pub const SUMMARY_TOP_N: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error(transparent)]
    Upstream(#[from] GatewayError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub total: i64,
    pub created: u64,
    pub updated: u64,
    pub skipped: u64,
    pub refreshed_at: DateTime<Utc>,
}

/// Current time at the microsecond precision of a `TIMESTAMP(6)` column, so the
/// value a refresh reports is the value read back later.
fn stored_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Runs the fetch -> reconcile -> record -> render pipeline.
pub struct RefreshService<'a> {
    store: &'a Store,
    gateway: &'a dyn CountryDataGateway,
    renderer: &'a SummaryRenderer,
    metrics: RefreshMetricsCollector,
    lock: &'a Mutex<()>,
}

impl<'a> RefreshService<'a> {
    pub fn new(
        store: &'a Store,
        gateway: &'a dyn CountryDataGateway,
        renderer: &'a SummaryRenderer,
        metrics: RefreshMetricsCollector,
        lock: &'a Mutex<()>,
    ) -> Self {
        Self {
            store,
            gateway,
            renderer,
            metrics,
            lock,
        }
    }

    pub async fn run(&self) -> Result<RefreshOutcome, RefreshError> {
        // One refresh at a time; a second caller waits for the first to finish.
        let _guard = self.lock.lock().await;
        let timer = MetricsTimer::new();

        let data = match self.gateway.fetch().await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("Refresh aborted: {}", e);
                self.metrics.record_upstream_failure(e.upstream);
                return Err(e.into());
            }
        };

        let (drafts, skipped) = {
            let mut rng = rand::rng();
            engine::prepare(&data.countries, &data.rates, &mut rng)
        };

        let result = self.persist(&drafts).await;
        let (summary, total, refreshed_at) = match result {
            Ok(persisted) => persisted,
            Err(e) => {
                self.metrics.record_store_failure();
                return Err(e.into());
            }
        };

        tracing::info!(
            "Refreshed countries: {} new, {} updated, {} skipped, {} total",
            summary.created,
            summary.updated,
            skipped,
            total
        );
        self.metrics.record_success(
            summary.created,
            summary.updated,
            skipped,
            total,
            timer.elapsed_secs(),
        );

        // The refresh is already committed; a broken chart must not undo it.
        if let Err(e) = self.render_summary(total, refreshed_at).await {
            tracing::warn!("Failed to render summary image: {}", e);
            self.metrics.record_render_failure();
        }

        Ok(RefreshOutcome {
            total,
            created: summary.created,
            updated: summary.updated,
            skipped,
            refreshed_at,
        })
    }

    async fn persist(
        &self,
        drafts: &[CountryDraft],
    ) -> Result<(engine::ReconcileSummary, i64, DateTime<Utc>), StoreError> {
        let summary = engine::reconcile(self.store.countries.as_ref(), drafts, stored_now()).await?;

        let total = self.store.countries.count().await?;
        let refreshed_at = stored_now();
        self.store.statuses.record(total, refreshed_at).await?;

        Ok((summary, total, refreshed_at))
    }

    /// Redraws the summary chart from the current store contents.
    pub async fn render_summary(
        &self,
        total: i64,
        refreshed_at: DateTime<Utc>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let top = self.store.countries.top_by_gdp(SUMMARY_TOP_N).await?;
        let bars = top
            .into_iter()
            .filter_map(|c| {
                c.estimated_gdp.map(|gdp| GdpBar {
                    name: c.name,
                    gdp_billions: gdp / 1e9,
                })
            })
            .collect();

        self.renderer.render(total, refreshed_at, bars).await?;
        Ok(())
    }
}
