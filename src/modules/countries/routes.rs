use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::AppState;
use super::controller;

pub fn country_routes() -> Router<Arc<AppState>> {
    // Static segments win over `{name}`, so "refresh" and "image" never
    // resolve to a country lookup.
    Router::new()
        .route("/countries/", get(controller::list_countries))
        .route("/countries/refresh", post(controller::refresh_countries))
        .route("/countries/image/", get(controller::get_summary_image))
        .route(
            "/countries/{name}/",
            get(controller::get_country).delete(controller::delete_country),
        )
}
