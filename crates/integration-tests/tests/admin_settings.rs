//! `GET`/`POST /api/redirect-setting` - session token auth and persistence.

use axum::body::Body;
use axum::http::Request;
use redirect404_app::config::Environment;
use redirect404_integration_tests::{
    API_SECRET, get, lazy_pool, migrated_pool, send, session_token, signed_proxy_query, test_app,
    test_config, unique_shop,
};
use serde_json::json;

fn authorized_get(token: &str) -> Request<Body> {
    Request::builder()
        .uri("/api/redirect-setting")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

fn authorized_post(token: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/redirect-setting")
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_owned()))
        .unwrap()
}

#[tokio::test]
async fn test_missing_token_rejected() {
    let app = test_app(test_config(Environment::Production, Some(API_SECRET)), lazy_pool());

    let response = send(app, get("/api/redirect-setting")).await;

    assert_eq!(response.status, 401);
    assert_eq!(response.json(), json!({ "error": "Invalid session token" }));
}

#[tokio::test]
async fn test_token_with_wrong_secret_rejected() {
    let app = test_app(test_config(Environment::Production, Some(API_SECRET)), lazy_pool());
    let token = session_token("example.myshopify.com", "some-other-app-secret");

    let response = send(app, authorized_get(&token)).await;

    assert_eq!(response.status, 401);
}

#[tokio::test]
async fn test_post_without_token_rejected() {
    let app = test_app(test_config(Environment::Production, Some(API_SECRET)), lazy_pool());
    let request = Request::builder()
        .method("POST")
        .uri("/api/redirect-setting")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from("redirectUrl=https%3A%2F%2Fexample.com%2F&isEnabled=true"))
        .unwrap();

    let response = send(app, request).await;

    assert_eq!(response.status, 401);
}

#[tokio::test]
async fn test_missing_secret_is_server_error() {
    let app = test_app(test_config(Environment::Production, None), lazy_pool());
    let token = session_token("example.myshopify.com", API_SECRET);

    let response = send(app, authorized_get(&token)).await;

    assert_eq!(response.status, 500);
    assert_eq!(response.json(), json!({ "error": "Server configuration error" }));
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (DATABASE_URL)"]
async fn test_unsaved_shop_defaults_to_enabled() {
    let pool = migrated_pool().await;
    let app = test_app(test_config(Environment::Production, Some(API_SECRET)), pool);
    let shop = unique_shop("admin-default");

    let response = send(app, authorized_get(&session_token(&shop, API_SECRET))).await;

    assert_eq!(response.status, 200);
    assert_eq!(
        response.json(),
        json!({ "shop": shop, "redirectUrl": "", "isEnabled": true })
    );
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (DATABASE_URL)"]
async fn test_save_then_proxy_serves_setting() {
    let pool = migrated_pool().await;
    let app = test_app(test_config(Environment::Production, Some(API_SECRET)), pool);
    let shop = unique_shop("admin-save");
    let token = session_token(&shop, API_SECRET);

    let saved = send(
        app.clone(),
        authorized_post(
            &token,
            "redirectUrl=https%3A%2F%2Fexample.com%2Fsale&isEnabled=true",
        ),
    )
    .await;
    assert_eq!(saved.status, 200);
    let body = saved.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["settings"]["shop"], shop.as_str());
    assert_eq!(body["settings"]["redirectUrl"], "https://example.com/sale");
    assert_eq!(body["settings"]["isEnabled"], true);

    let query = signed_proxy_query(&shop, API_SECRET);
    let proxied = send(app.clone(), get(&format!("/api/proxy/settings?{query}"))).await;
    assert_eq!(proxied.status, 200);
    assert_eq!(
        proxied.json(),
        json!({ "redirectUrl": "https://example.com/sale", "isEnabled": true })
    );

    let shown = send(app, authorized_get(&token)).await.json();
    assert_eq!(shown["redirectUrl"], "https://example.com/sale");
    assert_eq!(shown["shop"], shop.as_str());
    assert_eq!(shown["id"], body["settings"]["id"]);
    assert!(shown.get("createdAt").is_some());
    assert!(shown.get("updatedAt").is_some());
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (DATABASE_URL)"]
async fn test_save_replaces_cached_missing_record() {
    let pool = migrated_pool().await;
    let app = test_app(test_config(Environment::Production, Some(API_SECRET)), pool);
    let shop = unique_shop("admin-cached");
    let token = session_token(&shop, API_SECRET);

    // First lookup caches "no record" for the shop.
    let query = signed_proxy_query(&shop, API_SECRET);
    let before = send(app.clone(), get(&format!("/api/proxy/settings?{query}"))).await;
    assert_eq!(before.json(), json!({ "redirectUrl": "", "isEnabled": false }));

    let saved = send(
        app.clone(),
        authorized_post(
            &token,
            "redirectUrl=https%3A%2F%2Fexample.com%2Flanding&isEnabled=true",
        ),
    )
    .await;
    assert_eq!(saved.status, 200);

    let query = signed_proxy_query(&shop, API_SECRET);
    let after = send(app.clone(), get(&format!("/api/proxy/settings?{query}"))).await;
    assert_eq!(
        after.json(),
        json!({ "redirectUrl": "https://example.com/landing", "isEnabled": true })
    );

    let shown = send(app, authorized_get(&token)).await.json();
    assert_eq!(shown["redirectUrl"], "https://example.com/landing");
    assert_eq!(shown["isEnabled"], true);
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (DATABASE_URL)"]
async fn test_missing_enabled_field_disables() {
    let pool = migrated_pool().await;
    let app = test_app(test_config(Environment::Production, Some(API_SECRET)), pool);
    let shop = unique_shop("admin-disable");
    let token = session_token(&shop, API_SECRET);

    let saved = send(
        app.clone(),
        authorized_post(&token, "redirectUrl=https%3A%2F%2Fexample.com%2F"),
    )
    .await;
    assert_eq!(saved.status, 200);
    assert_eq!(saved.json()["settings"]["isEnabled"], false);

    let query = signed_proxy_query(&shop, API_SECRET);
    let proxied = send(app, get(&format!("/api/proxy/settings?{query}"))).await;
    assert_eq!(
        proxied.json(),
        json!({ "redirectUrl": "https://example.com/", "isEnabled": false })
    );
}
