mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use serde_json::Value;

use click_router::api::handlers::health_handler;
use click_router::state::AppState;

fn test_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_ok() {
    let app = common::create_test_app();
    let server = test_server(app.state.clone());

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["status"], "ok");
    assert_eq!(body["checks"]["click_queue"]["status"], "ok");
}

#[tokio::test]
async fn test_health_degraded_when_click_queue_closed() {
    let app = common::create_test_app();
    let server = test_server(app.state.clone());

    // Dropping the receiver closes the channel.
    drop(app.click_events);

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);
    let body: Value = response.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["click_queue"]["status"], "error");
}
