pub mod config;
pub mod modules;
pub mod services;

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use modules::countries::country_routes;
use modules::metrics::metrics_routes;
use modules::status::status_routes;
use services::gateway::CountryDataGateway;
use services::metrics::{metrics_middleware, MetricsRegistry, RefreshMetricsCollector};
use services::refresh::RefreshService;
use services::store::Store;
use services::summary::SummaryRenderer;

pub struct AppState {
    pub store: Store,
    pub gateway: Arc<dyn CountryDataGateway>,
    pub renderer: SummaryRenderer,
    pub metrics: Arc<MetricsRegistry>,
    refresh_lock: Mutex<()>,
}

impl AppState {
    pub fn new(
        store: Store,
        gateway: Arc<dyn CountryDataGateway>,
        renderer: SummaryRenderer,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        Self {
            store,
            gateway,
            renderer,
            metrics,
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn refresh_service(&self) -> RefreshService<'_> {
        RefreshService::new(
            &self.store,
            self.gateway.as_ref(),
            &self.renderer,
            RefreshMetricsCollector::new(self.metrics.clone()),
            &self.refresh_lock,
        )
    }
}

pub fn create_app(state: AppState) -> Router {
    let state = Arc::new(state);
    let metrics = state.metrics.clone();

    Router::new()
        .route("/", get(root))
        .merge(country_routes())
        .merge(status_routes())
        .merge(metrics_routes())
        .layer(middleware::from_fn_with_state(metrics, metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> &'static str {
    "Country Mirror API"
}
