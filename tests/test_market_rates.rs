mod common;

use common::*;
use krushi_pravah::domain::ports::diagnostics::FallbackKind;
use krushi_pravah::domain::values::prediction::Prediction;

fn kinds(h: &Harness) -> Vec<FallbackKind> {
    h.diagnostics.events().into_iter().map(|e| e.kind).collect()
}

#[tokio::test]
async fn test_live_pipeline_resolves_predicts_and_sorts() {
    let h = setup(live_site(), 0);
    let rates = h.app.current_rates().await;

    let names: Vec<&str> = rates.iter().map(|r| r.commodity.as_str()).collect();
    assert_eq!(names, vec!["Colocasia", "Onion", "Potato", "Tomato"]);

    let tomato = &rates[3];
    assert_eq!(tomato.commodity_marathi, "टोमॅटो");
    assert_eq!(tomato.min, 1000);
    assert_eq!(tomato.max, 2500);
    assert_eq!(tomato.modal, 1750);
    assert_eq!(tomato.prediction, Prediction::Decrease);
    assert_eq!(tomato.previous_modal, Some(1950));

    let onion = &rates[1];
    assert_eq!(onion.prediction, Prediction::Increase);
    assert_eq!(onion.previous_modal, Some(1700));

    let potato = &rates[2];
    assert_eq!(potato.prediction, Prediction::Decrease);
    assert_eq!(potato.previous_modal, None);

    let colocasia = &rates[0];
    assert_eq!(colocasia.commodity_marathi, "अळू");
    assert_eq!(colocasia.prediction, Prediction::Increase);

    assert!(h.diagnostics.events().is_empty());
}

#[tokio::test]
async fn test_output_sorted_ignoring_case() {
    let page = r#"<table>
      <tr><th>अ.क्र.</th><th>शेतिमाल</th><th>आवक</th><th>किमान</th><th>कमाल</th></tr>
      <tr><td>1</td><td>केळी</td><td>2000</td><td>1000</td><td>1400</td></tr>
      <tr><td>2</td><td>सफरचंद</td><td>2000</td><td>6000</td><td>9000</td></tr>
      <tr><td>3</td><td>चिक्कू</td><td>2000</td><td>1500</td><td>2500</td></tr>
    </table>"#;
    let h = setup_with(
        FakeFetcher::new().page(RATES_URL, page).page(HISTORY_URL, page),
        FakeTranslator::new(&[("सफरचंद", "apple")]),
        0,
    );

    let rates = h.app.current_rates().await;
    let names: Vec<&str> = rates.iter().map(|r| r.commodity.as_str()).collect();
    assert_eq!(names, vec!["apple", "Banana", "Chikoo"]);
}

#[tokio::test]
async fn test_unknown_label_translated_once_across_runs() {
    let h = setup(live_site(), 0);
    h.app.current_rates().await;
    h.app.current_rates().await;
    assert_eq!(h.fetcher.calls_to(RATES_URL), 2);
    assert_eq!(h.translator.call_count(), 1);
}

#[tokio::test]
async fn test_failed_live_fetch_serves_mock_dataset() {
    let h = setup(FakeFetcher::new().failing(RATES_URL, "timed out"), 3);
    let rates = h.app.current_rates().await;

    assert_eq!(rates.len(), 10);
    assert_eq!(rates[0].commodity, "Brinjal");
    assert_eq!(rates[0].commodity_marathi, "वांगे");
    assert_eq!(rates[9].commodity, "Tomato");
    assert_eq!(rates[9].prediction, Prediction::Decrease);
    assert!(rates.iter().all(|r| r.previous_modal.is_some()));

    assert_eq!(kinds(&h), vec![FallbackKind::LiveFetch, FallbackKind::MockDataset]);
    assert!(h.diagnostics.events()[0].cause.contains("timed out"));

    // Mock data is never cached.
    assert!(h.app.cached_rates().unwrap().is_empty());
}

#[tokio::test]
async fn test_page_without_rate_table_serves_mock_dataset() {
    let h = setup(FakeFetcher::new().page(RATES_URL, NO_TABLE_PAGE), 0);
    let rates = h.app.current_rates().await;
    assert_eq!(rates.len(), 10);
    assert_eq!(kinds(&h), vec![FallbackKind::LiveEmpty, FallbackKind::MockDataset]);
    assert_eq!(h.fetcher.calls_to(HISTORY_URL), 0);
}

#[tokio::test]
async fn test_historical_failure_uses_builtin_baseline() {
    let h = setup(
        FakeFetcher::new()
            .page(RATES_URL, CURRENT_PAGE)
            .failing(HISTORY_URL, "503"),
        0,
    );
    let rates = h.app.current_rates().await;
    assert_eq!(rates.len(), 4);
    assert_eq!(kinds(&h), vec![FallbackKind::HistoricalFetch]);

    let by_name = |n: &str| rates.iter().find(|r| r.commodity == n).unwrap();
    assert_eq!(by_name("Tomato").previous_modal, Some(2000));
    assert_eq!(by_name("Onion").previous_modal, Some(1800));
    assert_eq!(by_name("Onion").prediction, Prediction::Increase);
    assert_eq!(by_name("Potato").previous_modal, Some(1100));
    assert_eq!(by_name("Potato").prediction, Prediction::Decrease);
    assert_eq!(by_name("Colocasia").previous_modal, None);
}

#[tokio::test]
async fn test_historical_page_without_table_uses_builtin_baseline() {
    let h = setup(
        FakeFetcher::new()
            .page(RATES_URL, CURRENT_PAGE)
            .page(HISTORY_URL, NO_TABLE_PAGE),
        0,
    );
    let rates = h.app.current_rates().await;
    assert_eq!(rates.len(), 4);
    assert_eq!(kinds(&h), vec![FallbackKind::HistoricalEmpty]);
}

#[tokio::test]
async fn test_fresh_cache_short_circuits_fetch() {
    let h = setup(live_site(), 3);
    let first = h.app.current_rates().await;
    let second = h.app.current_rates().await;

    assert_eq!(first, second);
    assert_eq!(h.fetcher.calls_to(RATES_URL), 1);
    assert_eq!(h.app.cached_rates().unwrap().len(), 4);
}

#[tokio::test]
async fn test_zero_hour_horizon_disables_cache_reads() {
    let h = setup(live_site(), 0);
    h.app.current_rates().await;
    h.app.current_rates().await;
    assert_eq!(h.fetcher.calls_to(RATES_URL), 2);
    assert!(h.app.cached_rates().unwrap().is_empty());
}

#[tokio::test]
async fn test_live_rates_fail_without_fallback() {
    let h = setup(FakeFetcher::new().failing(RATES_URL, "dns"), 3);
    assert!(h.app.live_rates().await.is_err());

    let h = setup(FakeFetcher::new().page(RATES_URL, NO_TABLE_PAGE), 3);
    assert!(h.app.live_rates().await.is_err());
    assert!(h.diagnostics.events().is_empty());
}

#[tokio::test]
async fn test_live_rates_ignore_cache() {
    let h = setup(live_site(), 3);
    h.app.current_rates().await;
    h.app.live_rates().await.unwrap();
    assert_eq!(h.fetcher.calls_to(RATES_URL), 2);
}

#[tokio::test]
async fn test_cache_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("krushi.db");
    let settings = krushi_pravah::config::Settings {
        db_path: db.to_string_lossy().into_owned(),
        ..common::settings(3)
    };

    let open = |fetcher: std::sync::Arc<FakeFetcher>| {
        krushi_pravah::KrushiPravah::with_providers(
            &settings,
            krushi_pravah::Providers {
                fetcher,
                translator: None,
                diagnostics: std::sync::Arc::new(
                    krushi_pravah::infrastructure::diagnostics::MemoryDiagnostics::new(),
                ),
            },
        )
        .unwrap()
    };

    let first = open(std::sync::Arc::new(live_site()));
    let stored = first.current_rates().await;
    drop(first);

    let offline = std::sync::Arc::new(FakeFetcher::new());
    let second = open(offline.clone());
    assert_eq!(second.current_rates().await, stored);
    assert_eq!(offline.calls_to(RATES_URL), 0);
}

#[tokio::test]
async fn test_manual_rate_added_then_corrected() {
    let h = setup(FakeFetcher::new(), 3);
    let rate: krushi_pravah::domain::entities::market_rate::PredictedRate = serde_json::from_str(
        r#"{"commodity":"Garlic","commodityMarathi":"लसूण","arrival":400,
            "min":8000,"max":12000,"modal":10000,"date":"2025-04-12","prediction":"stable"}"#,
    )
    .unwrap();

    let stored = h.app.add_rate(rate).unwrap();
    let cached = h.app.cached_rates().unwrap();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].commodity, "Garlic");

    let update = serde_json::from_str(r#"{"modalRate":11000,"prediction":"increase"}"#).unwrap();
    let updated = h.app.update_rate(&stored.id, update).unwrap();
    assert_eq!(updated.rate.modal, 11000);
    assert_eq!(updated.rate.prediction, Prediction::Increase);
    assert_eq!(h.app.cached_rates().unwrap()[0].modal, 11000);

    // A fresh stored set is served without touching the site.
    assert_eq!(h.app.current_rates().await.len(), 1);
    assert_eq!(h.fetcher.calls_to(RATES_URL), 0);
}

#[test]
fn test_manual_rate_errors() {
    use krushi_pravah::domain::entities::market_rate::RateUpdate;
    use krushi_pravah::domain::error::DomainError;

    let h = setup(FakeFetcher::new(), 3);
    let update = RateUpdate {
        modal: Some(1),
        ..RateUpdate::default()
    };
    assert!(matches!(
        h.app.update_rate("no-such-id", update),
        Err(DomainError::NotFound(_))
    ));
    assert!(matches!(
        h.app.update_rate("no-such-id", RateUpdate::default()),
        Err(DomainError::InvalidInput(_))
    ));
}
