//! End-to-end session flow
//!
//! A mocked recipe API issues tokens, the client establishes the session, and
//! page loads against a live site server show what the route guard decides
//! for the cookie the session wrote.

mod common;

use std::sync::Arc;

use recipehub_auth::Role;
use recipehub_client::mock::MockNotifier;
use recipehub_client::{ApiError, ClientApp, ClientError, GENERIC_ERROR_MESSAGE};
use recipehub_session::storage::write_json;
use recipehub_session::{FileStore, SessionPhase};
use serde_json::{json, Value};
use tokio_test::assert_ok;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{TestConfig, TestSite};

async fn mock_login(api: &MockServer, email: &str, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": email, "password": "correct-horse"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": token})))
        .mount(api)
        .await;
}

#[test_log::test(tokio::test)]
async fn test_sign_in_navigate_restart_sign_out() {
    let config = TestConfig::from_env();
    let api = MockServer::start().await;
    let api_base = format!("{}/api", api.uri());
    let site = TestSite::spawn(&config, &api_base).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let storage_path = dir.path().join("storage.json");

    let token = config.token("cook-1", Role::Contributor, 3600);
    mock_login(&api, "cook-1@recipehub.test", &token).await;
    Mock::given(method("GET"))
        .and(path("/api/recipes"))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(1)
        .mount(&api)
        .await;

    let app = ClientApp::init(
        &site.client_config(&api_base),
        config.codec(),
        Arc::new(FileStore::new(&storage_path)),
        Arc::new(MockNotifier::new()),
    )
    .unwrap();

    // Signed out: protected pages bounce to sign-in
    let load = app.open("/dashboard").await.unwrap();
    assert_eq!(load.landed_on(), "/signin");

    let claims = app
        .sign_in("cook-1@recipehub.test", "correct-horse")
        .await
        .unwrap();
    assert_eq!(claims.id, "cook-1");
    assert_eq!(app.role(), Some(Role::Contributor));

    let load = app.open("/dashboard").await.unwrap();
    assert_eq!(load.status, 200);
    assert!(load.body.contains("Dashboard"));

    let load = app.open("/admin/users").await.unwrap();
    assert_eq!(load.landed_on(), "/unauthorized");

    let recipes: Value = app.api().get("/recipes", &[]).await.unwrap();
    assert_eq!(recipes, json!([{"id": 1}]));

    app.teardown();

    // Restart from the same storage file with a fresh cookie jar
    let app = ClientApp::init(
        &site.client_config(&api_base),
        config.codec(),
        Arc::new(FileStore::new(&storage_path)),
        Arc::new(MockNotifier::new()),
    )
    .unwrap();
    assert!(app.is_authenticated());
    assert_eq!(app.open("/recipe-catalog").await.unwrap().status, 200);

    app.sign_out();
    assert_eq!(app.reconcile(), SessionPhase::SignedOut);
    assert_eq!(app.open("/dashboard").await.unwrap().landed_on(), "/signin");
}

#[test_log::test(tokio::test)]
async fn test_admin_session_reaches_admin_pages() {
    let config = TestConfig::from_env();
    let api = MockServer::start().await;
    let api_base = format!("{}/api", api.uri());
    let site = TestSite::spawn(&config, &api_base).await.unwrap();
    let dir = tempfile::tempdir().unwrap();

    let token = config.token("chef-1", Role::Admin, 3600);
    mock_login(&api, "chef-1@recipehub.test", &token).await;

    let app = ClientApp::init(
        &site.client_config(&api_base),
        config.codec(),
        Arc::new(FileStore::new(dir.path().join("storage.json"))),
        Arc::new(MockNotifier::new()),
    )
    .unwrap();

    assert_ok!(app.sign_in("chef-1@recipehub.test", "correct-horse").await);

    let load = app.open("/admin/users").await.unwrap();
    assert_eq!(load.status, 200);
    assert!(!load.is_redirect());
}

#[test_log::test(tokio::test)]
async fn test_expired_session_is_dropped_at_startup() {
    let config = TestConfig::from_env();
    let api = MockServer::start().await;
    let api_base = format!("{}/api", api.uri());
    let site = TestSite::spawn(&config, &api_base).await.unwrap();
    let dir = tempfile::tempdir().unwrap();

    let storage = Arc::new(FileStore::new(dir.path().join("storage.json")));
    write_json(
        storage.as_ref(),
        "token",
        &config.token("cook-2", Role::Viewer, -1),
    )
    .unwrap();

    let app = ClientApp::init(
        &site.client_config(&api_base),
        config.codec(),
        storage,
        Arc::new(MockNotifier::new()),
    )
    .unwrap();

    assert!(!app.is_authenticated());
    assert_eq!(app.session().token(), None);
    assert_eq!(app.open("/dashboard").await.unwrap().landed_on(), "/signin");
}

#[test_log::test(tokio::test)]
async fn test_wrong_password_and_server_failures() {
    let config = TestConfig::from_env();
    let api = MockServer::start().await;
    let api_base = format!("{}/api", api.uri());
    let site = TestSite::spawn(&config, &api_base).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let notifier = MockNotifier::new();

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&api)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/category"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&api)
        .await;

    let app = ClientApp::init(
        &site.client_config(&api_base),
        config.codec(),
        Arc::new(FileStore::new(dir.path().join("storage.json"))),
        Arc::new(notifier.clone()),
    )
    .unwrap();

    // 4xx is the caller's to render; no notification
    let result = app.sign_in("cook-3@recipehub.test", "wrong").await;
    assert!(matches!(
        result,
        Err(ClientError::Api(ApiError::Client { status: 401, .. }))
    ));
    assert!(!app.is_authenticated());
    assert!(notifier.recorded_messages().is_empty());

    // 5xx is reported to the user
    let result: Result<Value, _> = app.api().get("/category", &[]).await;
    assert!(matches!(
        result,
        Err(ApiError::NetworkOrServer {
            status: Some(500),
            ..
        })
    ));
    assert_eq!(notifier.recorded_messages(), vec![GENERIC_ERROR_MESSAGE]);
}
