//! End-to-end tests for the fetch → insert → analyze pipeline

use cheapshark_deals::{
    cheapshark::{build_client, DealsEndpoint},
    commands::{
        pipeline::{run_pipeline, AbortReason, RunSummary},
        report::report_existing,
        FailurePolicy, ReportOptions, RunOptions, RunOutcome,
    },
    core::Config,
    report::ReportMode,
    DealDatabase, StoreId, UpperPrice,
};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

async fn serve(body: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1.0/deals"))
        .and(query_param("storeID", "1"))
        .and(query_param("upperPrice", "15"))
        .respond_with(body)
        .mount(&server)
        .await;
    server
}

fn config_for(server: &MockServer, db_path: &Path) -> Config {
    Config::new(
        DealsEndpoint::new(
            format!("{}/api/1.0/deals", server.uri()),
            StoreId::new(1),
            UpperPrice::new(15.0),
        ),
        db_path,
    )
}

fn db_path(dir: &TempDir) -> PathBuf {
    dir.path().join("nested").join("cheapshark_deals.db")
}

fn analyze() -> RunOptions {
    RunOptions {
        analyze: true,
        ..Default::default()
    }
}

async fn run(config: &Config, options: RunOptions) -> (RunOutcome, String) {
    let client = build_client().unwrap();
    let mut out = Vec::new();
    let outcome = run_pipeline(config, &client, &options, &mut out)
        .await
        .unwrap();
    (outcome, String::from_utf8(out).unwrap())
}

fn sample_deals() -> Value {
    json!([
        {
            "internalName": "PORTAL",
            "title": "Portal",
            "dealID": "deal-portal",
            "storeID": "1",
            "gameID": "100",
            "salePrice": "1.99",
            "normalPrice": "9.99",
            "isOnSale": "1",
            "savings": "80.080080",
            "metacriticScore": "90",
            "steamRatingText": "Overwhelmingly Positive",
            "steamRatingPercent": "98",
            "steamRatingCount": "150000",
            "steamAppID": "400",
            "releaseDate": 1192060800,
            "lastChange": 1700000000,
            "dealRating": "9.5",
            "thumb": "https://example.invalid/portal.jpg"
        },
        {
            "dealID": "deal-untitled",
            "salePrice": "4.99"
        },
        {
            "title": "Braid",
            "dealID": "deal-braid",
            "metacriticScore": "not rated"
        }
    ])
}

#[tokio::test]
async fn test_mixed_batch_stores_only_valid_deal() {
    let server = serve(ResponseTemplate::new(200).set_body_json(sample_deals())).await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &db_path(&dir));

    let (outcome, text) = run(&config, analyze()).await;

    match outcome {
        RunOutcome::Completed(RunSummary {
            inserted,
            skipped,
            analytics: Some(analytics),
        }) => {
            assert_eq!(inserted, 1);
            assert_eq!(skipped, 2);
            assert_eq!(analytics.completed, 11);
            assert_eq!(analytics.failed, 0);
        }
        other => panic!("Unexpected outcome: {:?}", other),
    }

    assert!(text.contains("Successfully fetched 3 deals."));
    assert_eq!(text.matches("Skipping deal").count(), 1);
    assert_eq!(text.matches("Error processing deal").count(), 1);
    assert!(text.contains("Successfully inserted 1 new deal records."));
    assert!(text.contains("--- Data Analysis Results ---"));
    assert!(text.contains("Release Date"));
    assert!(text.ends_with("Database connection closed.\n"));

    let db = DealDatabase::open(&config.database_path).unwrap();
    let stored = db.all_deals().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].record.deal_id.as_deref(), Some("deal-portal"));
    assert_eq!(stored[0].record.metacritic_score, Some(90));
}

#[tokio::test]
async fn test_second_run_skips_known_deals() {
    let server = serve(ResponseTemplate::new(200).set_body_json(sample_deals())).await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &db_path(&dir));

    run(&config, analyze()).await;
    let (outcome, text) = run(&config, analyze()).await;

    match outcome {
        RunOutcome::Completed(summary) => {
            assert_eq!(summary.inserted, 0);
            // Store is not empty, so analytics still runs
            assert!(summary.analytics.is_some());
        }
        other => panic!("Unexpected outcome: {:?}", other),
    }
    assert!(text.contains("Successfully inserted 0 new deal records."));

    let db = DealDatabase::open(&config.database_path).unwrap();
    assert_eq!(db.count_deals().unwrap(), 1);
}

#[tokio::test]
async fn test_empty_fetch_on_empty_store_skips_analytics() {
    let server = serve(ResponseTemplate::new(200).set_body_json(json!([]))).await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &db_path(&dir));

    let (outcome, text) = run(&config, analyze()).await;

    assert_eq!(
        outcome,
        RunOutcome::Completed(RunSummary {
            inserted: 0,
            skipped: 0,
            analytics: None,
        })
    );
    assert!(text.contains("No deals data to insert."));
    assert!(text.contains("No data available in the database for analysis."));
    assert!(!text.contains("Data Analysis Results"));
}

#[tokio::test]
async fn test_empty_fetch_on_populated_store_still_analyzes() {
    let dir = TempDir::new().unwrap();
    let path = db_path(&dir);

    let full = serve(ResponseTemplate::new(200).set_body_json(sample_deals())).await;
    run(&config_for(&full, &path), analyze()).await;

    let empty = serve(ResponseTemplate::new(200).set_body_json(json!([]))).await;
    let (outcome, text) = run(&config_for(&empty, &path), analyze()).await;

    match outcome {
        RunOutcome::Completed(summary) => assert!(summary.analytics.is_some()),
        other => panic!("Unexpected outcome: {:?}", other),
    }
    assert!(text.contains("No deals data to insert."));
    assert!(text.contains("Data Analysis Results"));
}

#[tokio::test]
async fn test_fetch_failure_stops_before_insert() {
    let server = serve(ResponseTemplate::new(500)).await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &db_path(&dir));

    let (outcome, text) = run(&config, analyze()).await;

    assert_eq!(outcome, RunOutcome::Aborted(AbortReason::FetchFailed));
    assert!(text.contains("Error fetching data from API"));
    assert!(text.contains("Cannot proceed with insertion and analysis."));
    assert!(!text.contains("Inserting data"));
    assert!(text.contains("Database connection closed."));
}

#[tokio::test]
async fn test_malformed_payload_stops_before_insert() {
    let server = serve(ResponseTemplate::new(200).set_body_string("{not json")).await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &db_path(&dir));

    let (outcome, text) = run(&config, analyze()).await;

    assert_eq!(outcome, RunOutcome::Aborted(AbortReason::FetchFailed));
    assert!(text.contains("Malformed deals payload"));
}

#[tokio::test]
async fn test_unopenable_store_stops_before_fetch() {
    let server = serve(ResponseTemplate::new(200).set_body_json(sample_deals())).await;
    let dir = TempDir::new().unwrap();
    // A directory cannot be opened as a database file
    let config = config_for(&server, dir.path());

    let (outcome, text) = run(&config, analyze()).await;

    assert_eq!(outcome, RunOutcome::Aborted(AbortReason::StoreUnavailable));
    assert!(text.contains("Failed to initialize database. Exiting."));
    assert!(!text.contains("Fetching data from API"));
    assert!(!text.contains("Database connection closed."));
}

#[tokio::test]
async fn test_fetch_only_mode_skips_analytics() {
    let server = serve(ResponseTemplate::new(200).set_body_json(sample_deals())).await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &db_path(&dir));

    let (outcome, text) = run(&config, RunOptions::default()).await;

    assert_eq!(
        outcome,
        RunOutcome::Completed(RunSummary {
            inserted: 1,
            skipped: 2,
            analytics: None,
        })
    );
    assert!(!text.contains("Data Analysis Results"));
    assert!(!text.contains("No data available"));
}

#[tokio::test]
async fn test_report_existing_store() {
    let server = serve(ResponseTemplate::new(200).set_body_json(sample_deals())).await;
    let dir = TempDir::new().unwrap();
    let path = db_path(&dir);
    run(&config_for(&server, &path), RunOptions::default()).await;

    let options = ReportOptions {
        mode: ReportMode::Compact,
        policy: FailurePolicy::Continue,
    };
    let mut out = Vec::new();
    let summary = report_existing(&path, &options, &mut out).unwrap().unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(summary.completed, 11);
    assert!(text.contains("   Total Deals: 1"));
    assert!(text.contains("Title: Portal"));
}

#[test]
fn test_report_empty_store() {
    let dir = TempDir::new().unwrap();
    let mut out = Vec::new();
    let summary = report_existing(&db_path(&dir), &ReportOptions::default(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(summary.is_none());
    assert!(text.contains("No data available in the database for analysis."));
    // Reporting never creates a store
    assert!(!dir.path().join("nested").exists());
}

#[tokio::test]
async fn test_report_store_with_no_rows() {
    let server = serve(ResponseTemplate::new(200).set_body_json(json!([]))).await;
    let dir = TempDir::new().unwrap();
    let path = db_path(&dir);
    run(&config_for(&server, &path), RunOptions::default()).await;
    assert!(path.exists());

    let mut out = Vec::new();
    let summary = report_existing(&path, &ReportOptions::default(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(summary.is_none());
    assert!(text.contains("No data available in the database for analysis."));
    assert!(text.contains("Database connection closed."));
}
