//! Integration tests for AppContext lifecycle
//!
//! Verify that the context wires up, probes its components, and shuts
//! down cleanly against mock HTTP endpoints and a temporary store.

use std::sync::Arc;
use std::time::Duration;

use orderdesk_domain::{Config, GatewayConfig, SheetsConfig, StorageConfig};
use orderdesk_lib::context::AppContext;
use tempfile::TempDir;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn wrap(json: &str) -> String {
    format!("/*O_o*/\ngoogle.visualization.Query.setResponse({json});")
}

fn creators_body() -> String {
    wrap(
        r#"{"table":{
            "cols":[{"label":"createdBy"}],
            "rows":[{"c":[{"v":"Jan"}]}]
        }}"#,
    )
}

fn test_config(sheets: &MockServer, gateway: &MockServer, storage: &TempDir) -> Config {
    Config {
        sheets: SheetsConfig {
            base_url: sheets.uri(),
            orders_spreadsheet_id: "orders-sheet-id".into(),
            projects_spreadsheet_id: "projects-sheet-id".into(),
            ..SheetsConfig::default()
        },
        gateway: GatewayConfig { exec_url: format!("{}/exec", gateway.uri()) },
        storage: StorageConfig { dir: storage.path().to_string_lossy().to_string() },
        ..Config::default()
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn context_creation_succeeds() {
    let sheets = MockServer::start().await;
    let gateway = MockServer::start().await;
    let storage = TempDir::new().expect("tempdir");

    let result = AppContext::new_with_config(test_config(&sheets, &gateway, &storage));
    assert!(result.is_ok(), "AppContext creation should succeed, got error: {:?}", result.err());

    let context = result.expect("context");
    assert!(Arc::strong_count(&context.session) >= 1, "session should be initialized");
    assert!(Arc::strong_count(&context.orders) >= 1, "orders should be initialized");
    assert!(Arc::strong_count(&context.dashboard) >= 1, "dashboard should be initialized");
}

#[tokio::test(flavor = "multi_thread")]
async fn shutdown_completes_and_is_idempotent() {
    let sheets = MockServer::start().await;
    let gateway = MockServer::start().await;
    let storage = TempDir::new().expect("tempdir");

    let context =
        AppContext::new_with_config(test_config(&sheets, &gateway, &storage)).expect("context");

    let result = tokio::time::timeout(Duration::from_secs(5), context.shutdown()).await;
    assert!(result.is_ok(), "shutdown() should complete within 5 seconds");
    assert!(result.expect("timed result").is_ok(), "shutdown() should return Ok");

    // Calling again must be safe.
    context.shutdown().await.expect("second shutdown");
}

#[tokio::test(flavor = "multi_thread")]
async fn health_check_reports_all_components_healthy() {
    let sheets = MockServer::start().await;
    let gateway = MockServer::start().await;
    let storage = TempDir::new().expect("tempdir");

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(creators_body()))
        .mount(&sheets)
        .await;

    let context =
        AppContext::new_with_config(test_config(&sheets, &gateway, &storage)).expect("context");

    let health = context.health_check().await;
    assert!(health.is_healthy, "all components should be healthy: {:?}", health.components);
    assert_eq!(health.score, 1.0);
    assert!(health.components.iter().any(|c| c.name == "sheets"));
    assert!(health.components.iter().any(|c| c.name == "local_store"));
}

#[tokio::test(flavor = "multi_thread")]
async fn health_check_flags_an_unreachable_sheets_endpoint() {
    let sheets = MockServer::start().await;
    let gateway = MockServer::start().await;
    let storage = TempDir::new().expect("tempdir");

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&sheets)
        .await;

    let context =
        AppContext::new_with_config(test_config(&sheets, &gateway, &storage)).expect("context");

    let health = context.health_check().await;
    assert!(!health.is_healthy, "sheets failure should degrade overall health");
    let sheets_component = health
        .components
        .iter()
        .find(|c| c.name == "sheets")
        .expect("sheets component present");
    assert!(!sheets_component.is_healthy);
    assert!(sheets_component.message.is_some());
}
