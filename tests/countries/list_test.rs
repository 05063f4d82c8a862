use serde_json::Value;

use crate::common::{draft, TestContext};

async fn seeded() -> TestContext {
    let ctx = TestContext::new().await;
    ctx.seed(draft("Nigeria", "Africa", "NGN", Some(250e9))).await;
    ctx.seed(draft("France", "Europe", "EUR", Some(900e9))).await;
    ctx.seed(draft("Ghana", "Africa", "GHS", Some(70e9))).await;
    ctx.seed(draft("Germany", "Europe", "EUR", None)).await;
    ctx.seed(draft("Kenya", "Africa", "KES", Some(250e9))).await;
    ctx
}

fn names(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("list response should be an array")
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect()
}

fn gdps(body: &Value) -> Vec<f64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|c| c["estimated_gdp"].as_f64().unwrap_or(f64::NEG_INFINITY))
        .collect()
}

#[tokio::test]
async fn list_without_parameters_returns_store_order() {
    let ctx = seeded().await;

    let response = ctx.server.get("/countries/").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(names(&body), ["Nigeria", "France", "Ghana", "Germany", "Kenya"]);

    let first = &body[0];
    for field in [
        "id",
        "name",
        "capital",
        "region",
        "population",
        "currency_code",
        "exchange_rate",
        "estimated_gdp",
        "flag_url",
        "last_refreshed_at",
    ] {
        assert!(first.get(field).is_some(), "Country should have {}", field);
    }

    ctx.cleanup().await;
}

#[tokio::test]
async fn region_filter_is_case_insensitive() {
    let ctx = seeded().await;

    let body: Value = ctx
        .server
        .get("/countries/")
        .add_query_param("region", "aFRICA")
        .await
        .json();

    assert_eq!(names(&body), ["Nigeria", "Ghana", "Kenya"]);

    ctx.cleanup().await;
}

#[tokio::test]
async fn currency_filter_combines_with_region() {
    let ctx = seeded().await;

    let body: Value = ctx
        .server
        .get("/countries/")
        .add_query_param("currency", "eur")
        .await
        .json();
    assert_eq!(names(&body), ["France", "Germany"]);

    let body: Value = ctx
        .server
        .get("/countries/")
        .add_query_param("currency", "eur")
        .add_query_param("region", "africa")
        .await
        .json();
    assert_eq!(body, serde_json::json!([]));

    ctx.cleanup().await;
}

#[tokio::test]
async fn gdp_desc_is_non_increasing() {
    let ctx = seeded().await;

    let body: Value = ctx
        .server
        .get("/countries/")
        .add_query_param("sort", "gdp_desc")
        .await
        .json();

    let values = gdps(&body);
    assert!(values.windows(2).all(|w| w[0] >= w[1]), "{:?}", values);
    // Equal GDPs keep store order.
    assert_eq!(names(&body), ["France", "Nigeria", "Kenya", "Ghana", "Germany"]);

    ctx.cleanup().await;
}

#[tokio::test]
async fn gdp_asc_is_non_decreasing() {
    let ctx = seeded().await;

    let body: Value = ctx
        .server
        .get("/countries/")
        .add_query_param("sort", "gdp_asc")
        .await
        .json();

    let values = gdps(&body);
    assert!(values.windows(2).all(|w| w[0] <= w[1]), "{:?}", values);
    assert_eq!(names(&body)[0], "Germany");

    ctx.cleanup().await;
}

#[tokio::test]
async fn unknown_sort_and_blank_filters_are_ignored() {
    let ctx = seeded().await;

    let body: Value = ctx
        .server
        .get("/countries/")
        .add_query_param("sort", "population")
        .add_query_param("region", "")
        .await
        .json();

    assert_eq!(names(&body), ["Nigeria", "France", "Ghana", "Germany", "Kenya"]);

    ctx.cleanup().await;
}
