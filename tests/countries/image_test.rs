use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{african_catalog, TestContext, AFRICAN_RATES};

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

#[tokio::test]
async fn image_before_any_refresh_is_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/countries/image/").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body, json!({ "error": "Summary image not found" }));

    ctx.cleanup().await;
}

#[tokio::test]
async fn image_is_served_as_png_from_the_cache_dir() {
    let ctx = TestContext::new().await;
    let mut bytes = PNG_SIGNATURE.to_vec();
    bytes.extend_from_slice(b"not really pixels");
    std::fs::create_dir_all(&ctx.cache_dir).unwrap();
    std::fs::write(ctx.renderer.path(), &bytes).unwrap();

    let response = ctx.server.get("/countries/image/").await;
    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "image/png");
    assert_eq!(response.as_bytes().as_ref(), bytes.as_slice());

    ctx.cleanup().await;
}

#[tokio::test]
async fn image_route_is_not_treated_as_a_country_name() {
    let ctx = TestContext::new().await;
    ctx.seed(crate::common::draft("Image", "Nowhere", "IMG", None)).await;

    let response = ctx.server.get("/countries/image/").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "Summary image not found");

    ctx.cleanup().await;
}

#[tokio::test]
async fn refresh_writes_a_png_when_the_renderer_succeeds() {
    let ctx = TestContext::new().await;
    ctx.gateway.serve(african_catalog(), AFRICAN_RATES);

    ctx.server.post("/countries/refresh").await.assert_status_ok();

    let response = ctx.server.get("/countries/image/").await;
    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "image/png");
    assert!(response.as_bytes().starts_with(PNG_SIGNATURE));
    assert!(ctx.renderer.path().is_file());

    ctx.cleanup().await;
}
