//! Integration tests for the command boundary
//!
//! Wire a full AppContext against mock sheets and gateway servers and a
//! temporary local store, then drive the commands the way a UI shell
//! would.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use orderdesk_core::orders::FetchOutcome;
use orderdesk_domain::{
    Config, FilterSpec, GatewayConfig, Order, OrderDeskError, Role, SheetsConfig, Status,
    StorageConfig, TokenClaims,
};
use orderdesk_lib::commands;
use orderdesk_lib::context::AppContext;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path, query_param_contains};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn wrap(json: &str) -> String {
    format!("/*O_o*/\ngoogle.visualization.Query.setResponse({json});")
}

fn orders_body() -> String {
    wrap(
        r#"{"table":{
            "cols":[{"label":"id"},{"label":"orderName"},{"label":"status"},{"label":"store"}],
            "rows":[{"c":[{"v":"41"},{"v":"Pręty"},{"v":"nowe"},{"v":"Castorama"}]}]
        }}"#,
    )
}

fn count_body(total: u64) -> String {
    wrap(&format!(
        r#"{{"table":{{
            "cols":[{{"label":""}}],
            "rows":[{{"c":[{{"v":"count id"}}]}},{{"c":[{{"v":{total}}}]}}]
        }}}}"#
    ))
}

fn projects_body() -> String {
    wrap(
        r#"{"table":{
            "cols":[{"label":""}],
            "rows":[{"c":[{"v":"project"}]},{"c":[{"v":"Osiedle Zielone"}]}]
        }}"#,
    )
}

fn token_for(sub: &str, role: &str, exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD
        .encode(format!(r#"{{"sub":"{sub}","role":"{role}","name":"Jan Kowalski","exp":{exp}}}"#));
    format!("{header}.{payload}.sig")
}

fn far_future() -> i64 {
    // Far enough that these tests never race the wall clock.
    4102444800 // 2100-01-01
}

fn claims(role: Role) -> TokenClaims {
    TokenClaims {
        sub: "sub-1".into(),
        role,
        name: "Jan Kowalski".into(),
        email: String::new(),
        position: "Brak stanowiska".into(),
        exp: far_future(),
    }
}

fn order(id: &str, status: Status, price: Option<f64>) -> Order {
    Order {
        id: id.into(),
        created_at: None,
        created_by: "Jan".into(),
        modified_at: None,
        modified_by: String::new(),
        store: "inny".into(),
        price_per_unit: price,
        total_price: price.map(|p| p * 2.0),
        currency: None,
        order_name: "Pręty".into(),
        status,
        deadline: None,
        object: "Serwis".into(),
        link: String::new(),
        quantity: 2,
        address: "ul. Budowlana 7".into(),
        note: String::new(),
        tgid: None,
    }
}

fn context_for(
    sheets: &MockServer,
    gateway: &MockServer,
    storage: &TempDir,
) -> Arc<AppContext> {
    let config = Config {
        sheets: SheetsConfig {
            base_url: sheets.uri(),
            orders_spreadsheet_id: "orders-sheet-id".into(),
            projects_spreadsheet_id: "projects-sheet-id".into(),
            ..SheetsConfig::default()
        },
        gateway: GatewayConfig { exec_url: format!("{}/exec", gateway.uri()) },
        storage: StorageConfig { dir: storage.path().to_string_lossy().to_string() },
        ..Config::default()
    };
    Arc::new(AppContext::new_with_config(config).expect("context"))
}

async fn mount_page_mocks(sheets: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/orders-sheet-id/gviz/tq"))
        .and(query_param_contains("tq", "COUNT(A)"))
        .respond_with(ResponseTemplate::new(200).set_body_string(count_body(1)))
        .mount(sheets)
        .await;
    Mock::given(method("GET"))
        .and(path("/orders-sheet-id/gviz/tq"))
        .and(query_param_contains("tq", "SELECT A,"))
        .respond_with(ResponseTemplate::new(200).set_body_string(orders_body()))
        .mount(sheets)
        .await;
    Mock::given(method("GET"))
        .and(path("/projects-sheet-id/gviz/tq"))
        .respond_with(ResponseTemplate::new(200).set_body_string(projects_body()))
        .mount(sheets)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn login_current_user_logout_round_trip() {
    let sheets = MockServer::start().await;
    let gateway = MockServer::start().await;
    let storage = TempDir::new().expect("tempdir");

    let token = token_for("sub-1", "approver", far_future());
    Mock::given(method("POST"))
        .and(path("/exec"))
        .and(body_partial_json(serde_json::json!({ "function": "loginUser" })))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"{{"status":"success","data":{{"token":"{token}"}}}}"#
        )))
        .mount(&gateway)
        .await;

    let ctx = context_for(&sheets, &gateway, &storage);

    let claims = commands::login(&ctx, "sub-1").await.expect("login");
    assert_eq!(claims.sub, "sub-1");
    assert_eq!(claims.role, Role::Approver);

    let current = commands::current_user(&ctx).await.expect("lookup");
    assert_eq!(current.as_ref().map(|c| c.sub.as_str()), Some("sub-1"));

    commands::logout(&ctx).await.expect("logout");
    assert!(commands::current_user(&ctx).await.expect("lookup").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn session_survives_a_context_restart() {
    let sheets = MockServer::start().await;
    let gateway = MockServer::start().await;
    let storage = TempDir::new().expect("tempdir");

    let token = token_for("sub-1", "admin", far_future());
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"{{"status":"success","data":{{"token":"{token}"}}}}"#
        )))
        .mount(&gateway)
        .await;

    {
        let ctx = context_for(&sheets, &gateway, &storage);
        commands::login(&ctx, "sub-1").await.expect("login");
    }

    // A fresh context over the same storage directory sees the session.
    let ctx = context_for(&sheets, &gateway, &storage);
    let current = commands::current_user(&ctx).await.expect("lookup");
    assert_eq!(current.map(|c| c.role), Some(Role::Admin));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_orders_returns_an_applied_page() {
    let sheets = MockServer::start().await;
    let gateway = MockServer::start().await;
    let storage = TempDir::new().expect("tempdir");
    mount_page_mocks(&sheets).await;

    let ctx = context_for(&sheets, &gateway, &storage);

    let outcome =
        commands::list_orders(&ctx, &FilterSpec::default()).await.expect("list orders");
    match outcome {
        FetchOutcome::Applied(page) => {
            assert_eq!(page.total, 1);
            assert_eq!(page.orders.len(), 1);
            assert_eq!(page.orders[0].id, "41");
            assert_eq!(page.projects, vec!["Osiedle Zielone".to_string()]);
        }
        FetchOutcome::Superseded => panic!("single fetch must apply"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn suggestion_lists_come_from_the_cached_page() {
    let sheets = MockServer::start().await;
    let gateway = MockServer::start().await;
    let storage = TempDir::new().expect("tempdir");
    mount_page_mocks(&sheets).await;

    let ctx = context_for(&sheets, &gateway, &storage);

    let stores = commands::store_options(&ctx).await.expect("stores");
    assert_eq!(stores, vec!["Castorama".to_string(), "inny".to_string()]);

    let objects = commands::object_options(&ctx).await.expect("objects");
    assert_eq!(
        objects,
        vec!["Magazyn (Biuro)".to_string(), "Osiedle Zielone".to_string(), "Serwis".to_string()]
    );

    // Both reads shared one cached fetch (three sheet queries).
    let requests = sheets.received_requests().await.expect("requests");
    assert_eq!(requests.len(), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn price_gated_transition_is_rejected_locally() {
    let sheets = MockServer::start().await;
    let gateway = MockServer::start().await;
    let storage = TempDir::new().expect("tempdir");

    // Any gateway traffic fails the test.
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"status":"success","data":null}"#),
        )
        .expect(0)
        .mount(&gateway)
        .await;

    let ctx = context_for(&sheets, &gateway, &storage);

    let selection =
        vec![order("1", Status::DoPotwierdzenia, Some(10.0)), order("2", Status::DoPotwierdzenia, None)];
    let err = commands::update_orders_status(
        &ctx,
        &claims(Role::Approver),
        &selection,
        Status::DoOplaty,
    )
    .await
    .expect_err("price gate must fail locally");

    match err {
        OrderDeskError::Validation(msg) => assert!(msg.contains('2'), "names the unpriced order"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn status_update_reaches_the_gateway_and_stamps_locally() {
    let sheets = MockServer::start().await;
    let gateway = MockServer::start().await;
    let storage = TempDir::new().expect("tempdir");

    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "function": "updateOrdersStatus",
            "parameters": [{ "ids": ["1"], "newStatus": "do opłaty", "sub": "sub-1" }]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"status":"success","data":null}"#),
        )
        .expect(1)
        .mount(&gateway)
        .await;

    let ctx = context_for(&sheets, &gateway, &storage);

    let selection = vec![order("1", Status::DoPotwierdzenia, Some(10.0))];
    let updated = commands::update_orders_status(
        &ctx,
        &claims(Role::Approver),
        &selection,
        Status::DoOplaty,
    )
    .await
    .expect("transition succeeds");

    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].status, Status::DoOplaty);
    assert_eq!(updated[0].modified_by, "Jan Kowalski");
}

#[tokio::test(flavor = "multi_thread")]
async fn filter_snapshot_round_trip_and_role_defaults() {
    let sheets = MockServer::start().await;
    let gateway = MockServer::start().await;
    let storage = TempDir::new().expect("tempdir");

    let ctx = context_for(&sheets, &gateway, &storage);

    // Without a snapshot, an approver lands on their inbox.
    let initial = commands::initial_filters(&ctx, &claims(Role::Approver)).await.expect("initial");
    assert_eq!(initial.statuses, vec!["do potwierdzenia".to_string()]);

    let custom = FilterSpec { search: "pręty".into(), ..FilterSpec::default() };
    commands::save_filter_snapshot(&ctx, custom.clone()).await.expect("save");

    let loaded = commands::load_filter_snapshot(&ctx).await.expect("load");
    assert_eq!(loaded, Some(custom.clone()));

    // The snapshot now wins over the role default.
    let resumed = commands::initial_filters(&ctx, &claims(Role::Approver)).await.expect("resume");
    assert_eq!(resumed, custom);

    commands::clear_filter_snapshot(&ctx).await.expect("clear");
    assert!(commands::load_filter_snapshot(&ctx).await.expect("load").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn theme_preference_defaults_and_persists() {
    let sheets = MockServer::start().await;
    let gateway = MockServer::start().await;
    let storage = TempDir::new().expect("tempdir");

    let ctx = context_for(&sheets, &gateway, &storage);

    assert_eq!(commands::get_theme(&ctx).await.expect("default theme"), "nord");

    commands::set_theme(&ctx, "dracula").await.expect("set theme");
    assert_eq!(commands::get_theme(&ctx).await.expect("theme"), "dracula");

    // Survives a restart through the file store.
    let ctx = context_for(&sheets, &gateway, &storage);
    assert_eq!(commands::get_theme(&ctx).await.expect("theme"), "dracula");
}

#[tokio::test(flavor = "multi_thread")]
async fn notification_toggle_goes_through_the_gateway() {
    let sheets = MockServer::start().await;
    let gateway = MockServer::start().await;
    let storage = TempDir::new().expect("tempdir");

    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "function": "updateAllowNotifications",
            "parameters": ["sub-1", 1]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"status":"success","data":null}"#),
        )
        .expect(1)
        .mount(&gateway)
        .await;

    let ctx = context_for(&sheets, &gateway, &storage);

    let now_allowed =
        commands::set_allow_notifications(&ctx, "sub-1", true).await.expect("toggle");
    assert!(now_allowed);
}
