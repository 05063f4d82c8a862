use axum::{extract::State, Json};
use std::sync::Arc;

use super::schema::StatusResponse;
use crate::modules::error::ApiError;
use crate::AppState;

// =============================================================================
// GET /status/ - Latest refresh snapshot
// =============================================================================

pub async fn get_status(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, ApiError> {
    let latest = state.store.statuses.latest().await?;
    Ok(Json(latest.into()))
}
