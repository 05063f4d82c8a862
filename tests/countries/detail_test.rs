use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{draft, TestContext};

#[tokio::test]
async fn get_country_matches_any_casing() {
    let ctx = TestContext::new().await;
    ctx.seed(draft("Ghana", "Africa", "GHS", Some(70e9))).await;

    for path in ["/countries/Ghana/", "/countries/ghana/", "/countries/GHANA/"] {
        let response = ctx.server.get(path).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["name"], "Ghana");
        assert_eq!(body["currency_code"], "GHS");
    }

    ctx.cleanup().await;
}

#[tokio::test]
async fn get_country_with_encoded_space() {
    let ctx = TestContext::new().await;
    ctx.seed(draft("United States of America", "Americas", "USD", Some(1.0))).await;

    let response = ctx.server.get("/countries/united%20states%20of%20america/").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["name"], "United States of America");

    ctx.cleanup().await;
}

#[tokio::test]
async fn get_unknown_country_returns_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/countries/Wakanda/").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body, json!({ "error": "Country not found" }));

    ctx.cleanup().await;
}

#[tokio::test]
async fn delete_removes_country_then_reports_not_found() {
    let ctx = TestContext::new().await;
    ctx.seed(draft("Kenya", "Africa", "KES", Some(100e9))).await;

    let response = ctx.server.delete("/countries/KENYA/").await;
    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.as_bytes().is_empty());

    ctx.server
        .get("/countries/kenya/")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let again = ctx.server.delete("/countries/kenya/").await;
    again.assert_status(StatusCode::NOT_FOUND);
    let body: Value = again.json();
    assert_eq!(body["error"], "Country not found");

    ctx.cleanup().await;
}

#[tokio::test]
async fn delete_never_inserted_returns_not_found() {
    let ctx = TestContext::new().await;

    ctx.server
        .delete("/countries/Atlantis/")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    ctx.cleanup().await;
}

#[tokio::test]
async fn delete_leaves_other_countries_alone() {
    let ctx = TestContext::new().await;
    ctx.seed(draft("Chad", "Africa", "XAF", None)).await;
    ctx.seed(draft("Mali", "Africa", "XOF", None)).await;

    ctx.server
        .delete("/countries/chad/")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let body: Value = ctx.server.get("/countries/").await.json();
    let remaining: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(remaining, ["Mali"]);

    ctx.cleanup().await;
}

#[tokio::test]
async fn accented_names_are_distinct_from_plain_spellings() {
    let ctx = TestContext::new().await;
    ctx.seed(draft("Côte d'Ivoire", "Africa", "XOF", Some(1.0))).await;

    ctx.server
        .get("/countries/cote%20d'ivoire/")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let response = ctx.server.get("/countries/C%C3%94TE%20D'IVOIRE/").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["name"], "Côte d'Ivoire");

    ctx.seed(draft("Cote d'Ivoire", "Africa", "XOF", Some(2.0))).await;
    let all: Value = ctx.server.get("/countries/").await.json();
    assert_eq!(all.as_array().unwrap().len(), 2);

    ctx.cleanup().await;
}
