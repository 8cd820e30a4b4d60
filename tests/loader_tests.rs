/// Integration tests for fetching runner prices over HTTP and from disk
use runner_prices::{
    config::SourceConfig,
    error::AppError,
    pricing::{
        fetch_resource, load_table, LoadState, ResourceLocation, RunnerTableService,
        TableUpdater,
    },
};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

const SCENARIO: &str = "header1;header2;pricePerMinute\nrunnerA;2cpu;0.50\nrunnerB;4cpu;1.00\n";

/// Serve `body` with `status` at /runner_prices.csv
async fn setup_csv_mock(status: u16, body: &str, latency_ms: u64) -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/runner_prices.csv"))
        .respond_with(
            ResponseTemplate::new(status)
                .set_delay(Duration::from_millis(latency_ms))
                .set_body_string(body),
        )
        .mount(&mock_server)
        .await;

    mock_server
}

fn source(location: String, timeout_seconds: u64) -> SourceConfig {
    SourceConfig {
        location,
        timeout_seconds,
        refresh_interval_seconds: 0,
    }
}

#[tokio::test]
async fn test_load_table_over_http() {
    let server = setup_csv_mock(200, SCENARIO, 0).await;

    let (table, hash) = load_table(&source(format!("{}/runner_prices.csv", server.uri()), 5))
        .await
        .unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[1].price().default_price(), "1.00");
    assert_eq!(hash.len(), 64);
}

#[tokio::test]
async fn test_non_200_status_is_load_failure() {
    for status in [404, 500, 204] {
        let server = setup_csv_mock(status, SCENARIO, 0).await;
        let location = ResourceLocation::parse(&format!("{}/runner_prices.csv", server.uri()));

        let result = fetch_resource(&location, Duration::from_secs(5)).await;
        assert!(
            matches!(result, Err(AppError::ResourceLoad { .. })),
            "status {} should fail",
            status
        );
    }
}

#[tokio::test]
async fn test_http_timeout_is_load_failure() {
    let server = setup_csv_mock(200, SCENARIO, 3_000).await;
    let location = ResourceLocation::parse(&format!("{}/runner_prices.csv", server.uri()));

    let result = fetch_resource(&location, Duration::from_millis(200)).await;
    assert!(matches!(result, Err(AppError::ResourceLoad { .. })));
}

#[tokio::test]
async fn test_failed_fetch_leaves_table_empty() {
    let server = setup_csv_mock(404, "", 0).await;
    let service = Arc::new(RunnerTableService::new());
    let updater = TableUpdater::new(
        service.clone(),
        ResourceLocation::parse(&format!("{}/runner_prices.csv", server.uri())),
        Duration::from_secs(5),
        None,
    );

    updater.run_once().await;

    let snapshot = service.snapshot().await;
    assert!(snapshot.table.is_empty());
    match snapshot.state {
        LoadState::Failed { reason, .. } => assert!(reason.contains("404")),
        other => panic!("Expected failed state, got {:?}", other),
    }
}

#[tokio::test]
async fn test_background_task_loads_once_without_refresh() {
    let server = setup_csv_mock(200, SCENARIO, 0).await;
    let service = Arc::new(RunnerTableService::new());
    let updater = Arc::new(TableUpdater::new(
        service.clone(),
        ResourceLocation::parse(&format!("{}/runner_prices.csv", server.uri())),
        Duration::from_secs(5),
        None,
    ));

    // returns after the first load when no refresh interval is set
    updater.start_background_task().await;

    assert!(service.state().await.is_loaded());
    assert_eq!(service.snapshot().await.table.len(), 2);
}

#[tokio::test]
async fn test_load_table_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SCENARIO.as_bytes()).unwrap();
    file.flush().unwrap();

    let (table, _) = load_table(&source(file.path().display().to_string(), 5))
        .await
        .unwrap();

    assert_eq!(table.len(), 2);
    assert!(table.rows().iter().all(|row| row.cell_count() == 4));
}
