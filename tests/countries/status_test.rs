use serde_json::{json, Value};

use crate::common::{african_catalog, TestContext, AFRICAN_RATES};

#[tokio::test]
async fn status_before_any_refresh_is_zero() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/status/").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body, json!({ "total_countries": 0, "last_refreshed_at": null }));

    ctx.cleanup().await;
}

#[tokio::test]
async fn status_reports_latest_refresh() {
    let ctx = TestContext::new().await;
    ctx.gateway.serve(african_catalog(), AFRICAN_RATES);
    ctx.server.post("/countries/refresh").await.assert_status_ok();

    ctx.gateway.serve(json!([{ "name": "Togo", "population": 8278737 }]), &[]);
    let latest: Value = ctx.server.post("/countries/refresh").await.json();

    let status: Value = ctx.server.get("/status/").await.json();
    assert_eq!(status["total_countries"], 4);
    assert_eq!(status["last_refreshed_at"], latest["last_refreshed_at"]);

    ctx.cleanup().await;
}

#[tokio::test]
async fn deleting_a_country_does_not_rewrite_status() {
    let ctx = TestContext::new().await;
    ctx.gateway.serve(african_catalog(), AFRICAN_RATES);
    ctx.server.post("/countries/refresh").await.assert_status_ok();

    ctx.server.delete("/countries/ghana/").await;

    let status: Value = ctx.server.get("/status/").await.json();
    assert_eq!(status["total_countries"], 3);

    ctx.cleanup().await;
}
