use chrono::{Duration, SubsecRound, Utc};

use country_mirror::modules::countries::interface::{CountryFilter, GdpSort, UpsertOutcome};

use crate::common::{draft, TestContext};

#[tokio::test]
async fn top_by_gdp_skips_unknown_gdp_and_honors_limit() {
    let ctx = TestContext::new().await;
    for (name, gdp) in [
        ("Nigeria", Some(500.0)),
        ("Ghana", Some(300.0)),
        ("Togo", None),
        ("Benin", Some(300.0)),
        ("Kenya", Some(900.0)),
        ("Mali", Some(10.0)),
        ("Chad", Some(20.0)),
    ] {
        ctx.seed(draft(name, "Africa", "XXX", gdp)).await;
    }

    let top = ctx.store.countries.top_by_gdp(5).await.unwrap();
    let names: Vec<&str> = top.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Kenya", "Nigeria", "Ghana", "Benin", "Chad"]);

    let top_two = ctx.store.countries.top_by_gdp(2).await.unwrap();
    assert_eq!(top_two.len(), 2);

    ctx.cleanup().await;
}

#[tokio::test]
async fn list_filters_ignore_case_and_sort_puts_unknown_gdp_lowest() {
    let ctx = TestContext::new().await;
    ctx.seed(draft("Nigeria", "Africa", "NGN", Some(500.0))).await;
    ctx.seed(draft("Togo", "AFRICA", "XOF", None)).await;
    ctx.seed(draft("Benin", "africa", "xof", Some(300.0))).await;
    ctx.seed(draft("France", "Europe", "EUR", Some(900.0))).await;

    let filter = CountryFilter {
        region: Some("Africa".to_string()),
        currency: Some("XOF".to_string()),
        sort: GdpSort::None,
    };
    let names: Vec<String> = ctx
        .store
        .countries
        .list(&filter)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["Togo", "Benin"]);

    let desc = CountryFilter {
        region: Some("africa".to_string()),
        sort: GdpSort::Desc,
        ..Default::default()
    };
    let names: Vec<String> = ctx
        .store
        .countries
        .list(&desc)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["Nigeria", "Benin", "Togo"]);

    let asc = CountryFilter {
        sort: GdpSort::Asc,
        ..Default::default()
    };
    let first = ctx.store.countries.list(&asc).await.unwrap();
    assert_eq!(first[0].name, "Togo");

    ctx.cleanup().await;
}

#[tokio::test]
async fn upsert_by_name_key_overwrites_casing_and_timestamp() {
    let ctx = TestContext::new().await;
    let first_seen = Utc::now().trunc_subsecs(6) - Duration::minutes(10);
    let later = Utc::now().trunc_subsecs(6);

    let created = ctx
        .store
        .countries
        .upsert(&draft("nigeria", "Africa", "NGN", Some(1.0)), first_seen)
        .await
        .unwrap();
    let updated = ctx
        .store
        .countries
        .upsert(&draft("Nigeria", "Africa", "NGN", Some(2.0)), later)
        .await
        .unwrap();

    assert_eq!(created, UpsertOutcome::Created);
    assert_eq!(updated, UpsertOutcome::Updated);
    assert_eq!(ctx.store.countries.count().await.unwrap(), 1);

    let stored = ctx.store.countries.find_by_name("NIGERIA").await.unwrap().unwrap();
    assert_eq!(stored.name, "Nigeria");
    assert_eq!(stored.estimated_gdp, Some(2.0));
    assert_eq!(stored.last_refreshed_at, later);

    ctx.cleanup().await;
}

#[tokio::test]
async fn latest_status_is_newest_timestamp_then_newest_id() {
    let ctx = TestContext::new().await;
    let earlier = Utc::now().trunc_subsecs(6) - Duration::minutes(5);
    let later = Utc::now().trunc_subsecs(6);

    ctx.store.statuses.record(7, later).await.unwrap();
    ctx.store.statuses.record(3, earlier).await.unwrap();
    let latest = ctx.store.statuses.latest().await.unwrap().unwrap();
    assert_eq!(latest.total_countries, 7);
    assert_eq!(latest.last_refreshed_at, later);

    let tie_id = ctx.store.statuses.record(9, later).await.unwrap();
    let latest = ctx.store.statuses.latest().await.unwrap().unwrap();
    assert_eq!(latest.id, tie_id);
    assert_eq!(latest.total_countries, 9);

    ctx.cleanup().await;
}
