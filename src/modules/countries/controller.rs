use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use super::model::Country;
use super::schema::{CountriesQuery, RefreshResponse};
use crate::modules::error::ApiError;
use crate::AppState;

// =============================================================================
// GET /countries/ - List countries with optional filters and GDP sort
// =============================================================================

pub async fn list_countries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CountriesQuery>,
) -> Result<Json<Vec<Country>>, ApiError> {
    let filter = query.into_filter();
    let countries = state.store.countries.list(&filter).await?;
    Ok(Json(countries))
}

// =============================================================================
// GET /countries/{name}/ - Single country, case-insensitive
// =============================================================================

pub async fn get_country(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Country>, ApiError> {
    state
        .store
        .countries
        .find_by_name(&name)
        .await?
        .map(Json)
        .ok_or(ApiError::CountryNotFound)
}

// =============================================================================
// DELETE /countries/{name}/
// =============================================================================

pub async fn delete_country(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !state.store.countries.delete_by_name(&name).await? {
        return Err(ApiError::CountryNotFound);
    }

    tracing::info!("Deleted country {}", name);
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// POST /countries/refresh - Pull both upstreams and rebuild the mirror
// =============================================================================

pub async fn refresh_countries(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let outcome = state.refresh_service().run().await?;

    Ok(Json(RefreshResponse {
        message: "Successfully refreshed countries data",
        total: outcome.total,
        updated: outcome.updated,
        created: outcome.created,
        last_refreshed_at: outcome.refreshed_at,
    }))
}

// =============================================================================
// GET /countries/image/ - Summary chart from the last refresh
// =============================================================================

pub async fn get_summary_image(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = state
        .renderer
        .read()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .ok_or(ApiError::ImageNotFound)?;

    Ok(([(header::CONTENT_TYPE, "image/png")], bytes))
}
