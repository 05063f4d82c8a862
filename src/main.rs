use std::sync::Arc;

use country_mirror::config::{init_db, Config};
use country_mirror::services::gateway::HttpGateway;
use country_mirror::services::metrics::MetricsRegistry;
use country_mirror::services::store::Store;
use country_mirror::services::summary::SummaryRenderer;
use country_mirror::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "country_mirror=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load environment configuration");

    let store = match config.database_url.as_deref() {
        Some(url) => {
            let db = init_db(url).await.expect("Failed to connect to MySQL");
            tracing::info!("Connected to MySQL");
            Store::mysql(db)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            Store::in_memory()
        }
    };

    let gateway = HttpGateway::from_config(&config).expect("Failed to build HTTP client");
    let renderer = SummaryRenderer::new(&config.cache_dir);
    let metrics = MetricsRegistry::new().expect("Failed to initialize metrics registry");

    let state = AppState::new(store, Arc::new(gateway), renderer, metrics);
    let app = country_mirror::create_app(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await.expect("Server error");
}
