mod common;

use axum::Router;
use axum_test::TestServer;
use serde_json::{Value, json};

use click_router::api::routes::admin_routes;
use click_router::domain::entities::{RedirectMethod, UrlStatus};
use click_router::domain::repositories::UrlRepository;
use click_router::state::AppState;

fn test_server(state: AppState) -> TestServer {
    let app = Router::new().nest("/api", admin_routes()).with_state(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_create_campaign_with_defaults() {
    let app = common::create_test_app();
    let server = test_server(app.state.clone());

    let response = server
        .post("/api/campaigns")
        .json(&json!({"name": "Spring Sale"}))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["name"], "Spring Sale");
    assert_eq!(body["redirect_method"], "direct");
    assert_eq!(body["auto_manage"], false);
    assert_eq!(body["recheck_wait_minutes"], 10);
}

#[tokio::test]
async fn test_create_campaign_full_payload() {
    let app = common::create_test_app();
    let server = test_server(app.state.clone());

    let response = server
        .post("/api/campaigns")
        .json(&json!({
            "name": "Spring Sale",
            "redirect_method": "double_meta_refresh",
            "custom_path": "spring-sale",
            "click_multiplier": "1.2",
            "price_per_thousand_clicks": "5.50",
            "auto_manage": true,
            "platform_campaign_id": "pc-77",
            "recheck_wait_minutes": 15
        }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["redirect_method"], "double_meta_refresh");
    assert_eq!(body["custom_path"], "spring-sale");
    assert_eq!(body["platform_campaign_id"], "pc-77");
    assert_eq!(body["recheck_wait_minutes"], 15);
}

#[tokio::test]
async fn test_create_campaign_empty_name_is_400() {
    let app = common::create_test_app();
    let server = test_server(app.state.clone());

    let response = server.post("/api/campaigns").json(&json!({"name": ""})).await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_campaign_bad_slug_is_400() {
    let app = common::create_test_app();
    let server = test_server(app.state.clone());

    let response = server
        .post("/api/campaigns")
        .json(&json!({"name": "Spring", "custom_path": "bad path!"}))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_campaign_duplicate_path_is_409() {
    let app = common::create_test_app();
    let server = test_server(app.state.clone());

    let payload = json!({"name": "Spring", "custom_path": "spring-sale"});
    assert_eq!(server.post("/api/campaigns").json(&payload).await.status_code(), 201);

    let response = server.post("/api/campaigns").json(&payload).await;
    assert_eq!(response.status_code(), 409);
}

#[tokio::test]
async fn test_list_and_get_campaigns() {
    let app = common::create_test_app();
    let campaign =
        common::create_test_campaign(&app.campaigns, "spring", RedirectMethod::Direct).await;
    common::create_test_campaign(&app.campaigns, "summer", RedirectMethod::Http307).await;

    let server = test_server(app.state.clone());

    let list: Value = server.get("/api/campaigns").await.json();
    assert_eq!(list.as_array().unwrap().len(), 2);

    let one: Value = server
        .get(&format!("/api/campaigns/{}", campaign.id))
        .await
        .json();
    assert_eq!(one["id"], campaign.id);
    assert_eq!(one["name"], "spring");
}

#[tokio::test]
async fn test_get_unknown_campaign_is_404() {
    let app = common::create_test_app();
    let server = test_server(app.state.clone());

    server.get("/api/campaigns/999").await.assert_status_not_found();
}

#[tokio::test]
async fn test_patch_campaign_updates_fields() {
    let app = common::create_test_app();
    let campaign =
        common::create_test_campaign(&app.campaigns, "spring", RedirectMethod::Direct).await;

    let server = test_server(app.state.clone());
    let response = server
        .patch(&format!("/api/campaigns/{}", campaign.id))
        .json(&json!({"name": "Spring v2", "redirect_method": "meta_refresh"}))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["name"], "Spring v2");
    assert_eq!(body["redirect_method"], "meta_refresh");
}

#[tokio::test]
async fn test_patch_null_clears_custom_path() {
    let app = common::create_test_app();
    let campaign = common::create_campaign_with_path(
        &app.campaigns,
        "spring",
        RedirectMethod::Direct,
        "spring-sale",
    )
    .await;

    let server = test_server(app.state.clone());
    let response = server
        .patch(&format!("/api/campaigns/{}", campaign.id))
        .json(&json!({"custom_path": null}))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert!(body["custom_path"].is_null());

    // Absent field leaves the name alone.
    assert_eq!(body["name"], "spring");
}

#[tokio::test]
async fn test_create_url_applies_multiplier() {
    let app = common::create_test_app();
    let server = test_server(app.state.clone());

    let campaign: Value = server
        .post("/api/campaigns")
        .json(&json!({"name": "Spring", "click_multiplier": "1.2"}))
        .await
        .json();

    let response = server
        .post(&format!("/api/campaigns/{}/urls", campaign["id"]))
        .json(&json!({
            "name": "landing-a",
            "target_url": "https://shop.example.com/a",
            "click_limit": 1000
        }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["click_limit"], 1200);
    assert_eq!(body["clicks"], 0);
    assert_eq!(body["remaining"], 1200);
    assert_eq!(body["status"], "active");
}

#[tokio::test]
async fn test_create_url_invalid_target_is_400() {
    let app = common::create_test_app();
    let campaign =
        common::create_test_campaign(&app.campaigns, "spring", RedirectMethod::Direct).await;

    let server = test_server(app.state.clone());
    let response = server
        .post(&format!("/api/campaigns/{}/urls", campaign.id))
        .json(&json!({
            "name": "landing-a",
            "target_url": "not a url",
            "click_limit": 1000
        }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_patch_url_pauses_and_resumes() {
    let app = common::create_test_app();
    let campaign =
        common::create_test_campaign(&app.campaigns, "spring", RedirectMethod::Direct).await;
    let url =
        common::create_test_url(&app.urls, campaign.id, "https://shop.example.com/a", 100).await;

    let server = test_server(app.state.clone());

    let paused: Value = server
        .patch(&format!("/api/urls/{}", url.id))
        .json(&json!({"status": "paused"}))
        .await
        .json();
    assert_eq!(paused["status"], "paused");

    let resumed: Value = server
        .patch(&format!("/api/urls/{}", url.id))
        .json(&json!({"status": "active"}))
        .await
        .json();
    assert_eq!(resumed["status"], "active");
}

#[tokio::test]
async fn test_delete_url_is_soft() {
    let app = common::create_test_app();
    let campaign =
        common::create_test_campaign(&app.campaigns, "spring", RedirectMethod::Direct).await;
    let url =
        common::create_test_url(&app.urls, campaign.id, "https://shop.example.com/a", 100).await;

    let server = test_server(app.state.clone());
    let response = server.delete(&format!("/api/urls/{}", url.id)).await;

    assert_eq!(response.status_code(), 204);

    // Row survives with deleted status.
    let stored = app.urls.find_by_id(url.id).await.unwrap().unwrap();
    assert_eq!(stored.status, UrlStatus::Deleted);
}

#[tokio::test]
async fn test_delete_unknown_url_is_404() {
    let app = common::create_test_app();
    let server = test_server(app.state.clone());

    server.delete("/api/urls/999").await.assert_status_not_found();
}

#[tokio::test]
async fn test_campaign_stats_aggregates_urls() {
    let app = common::create_test_app();
    let campaign =
        common::create_test_campaign(&app.campaigns, "spring", RedirectMethod::Direct).await;
    let a =
        common::create_test_url(&app.urls, campaign.id, "https://shop.example.com/a", 100).await;
    common::create_test_url(&app.urls, campaign.id, "https://shop.example.com/b", 50).await;

    app.urls.register_click(a.id).await.unwrap();
    app.urls.register_click(a.id).await.unwrap();

    let server = test_server(app.state.clone());
    let body: Value = server
        .get(&format!("/api/campaigns/{}/stats", campaign.id))
        .await
        .json();

    assert_eq!(body["campaign_id"], campaign.id);
    assert_eq!(body["total_clicks"], 2);
    assert_eq!(body["total_limit"], 150);
    assert_eq!(body["active_remaining"], 148);
    assert_eq!(body["urls"].as_array().unwrap().len(), 2);
}
