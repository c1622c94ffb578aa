//! `GET /api/proxy/settings` - App Proxy signature checks and responses.

use redirect404_app::config::Environment;
use redirect404_integration_tests::{
    API_SECRET, get, lazy_pool, migrated_pool, send, session_token, signed_proxy_query, test_app,
    test_config, unique_shop,
};
use redirect404_core::proxy::{self, QueryParams};
use serde_json::json;

fn production_app() -> axum::Router {
    test_app(test_config(Environment::Production, Some(API_SECRET)), lazy_pool())
}

#[tokio::test]
async fn test_missing_secret_is_server_error() {
    let app = test_app(test_config(Environment::Production, None), lazy_pool());
    let query = signed_proxy_query("example.myshopify.com", API_SECRET);

    let response = send(app, get(&format!("/api/proxy/settings?{query}"))).await;

    assert_eq!(response.status, 500);
    assert_eq!(response.json(), json!({ "error": "Server configuration error" }));
}

#[tokio::test]
async fn test_unsigned_request_rejected() {
    let response = send(
        production_app(),
        get("/api/proxy/settings?shop=example.myshopify.com"),
    )
    .await;

    assert_eq!(response.status, 401);
    assert_eq!(response.json(), json!({ "error": "Invalid signature" }));
}

#[tokio::test]
async fn test_wrong_secret_rejected() {
    let query = signed_proxy_query("example.myshopify.com", "not-the-app-secret");

    let response = send(production_app(), get(&format!("/api/proxy/settings?{query}"))).await;

    assert_eq!(response.status, 401);
}

#[tokio::test]
async fn test_tampered_shop_rejected() {
    let query = signed_proxy_query("example.myshopify.com", API_SECRET)
        .replace("example.myshopify.com", "attacker.myshopify.com");

    let response = send(production_app(), get(&format!("/api/proxy/settings?{query}"))).await;

    assert_eq!(response.status, 401);
}

#[tokio::test]
async fn test_signed_request_without_shop_is_bad_request() {
    let mut params = QueryParams::new();
    params.insert("timestamp".to_string(), "1700000000".to_string());
    let signature = proxy::sign(&params, API_SECRET).unwrap();
    params.insert(proxy::SIGNATURE_PARAM.to_string(), signature);
    let query = proxy::to_query_string(&params);

    let response = send(production_app(), get(&format!("/api/proxy/settings?{query}"))).await;

    assert_eq!(response.status, 400);
    assert_eq!(response.json(), json!({ "error": "Shop parameter is required" }));
}

#[tokio::test]
async fn test_development_skips_signature() {
    let app = test_app(test_config(Environment::Development, None), lazy_pool());

    // No signature and no secret: the shop check is the first to fail.
    let response = send(app, get("/api/proxy/settings")).await;

    assert_eq!(response.status, 400);
}

#[tokio::test]
async fn test_session_token_is_not_a_proxy_credential() {
    let request = axum::http::Request::builder()
        .uri("/api/proxy/settings?shop=example.myshopify.com")
        .header(
            "authorization",
            format!("Bearer {}", session_token("example.myshopify.com", API_SECRET)),
        )
        .body(axum::body::Body::empty())
        .unwrap();

    let response = send(production_app(), request).await;

    assert_eq!(response.status, 401);
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (DATABASE_URL)"]
async fn test_unknown_shop_is_disabled() {
    let pool = migrated_pool().await;
    let app = test_app(test_config(Environment::Production, Some(API_SECRET)), pool);
    let query = signed_proxy_query(&unique_shop("proxy-unknown"), API_SECRET);

    let response = send(app, get(&format!("/api/proxy/settings?{query}"))).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.json(), json!({ "redirectUrl": "", "isEnabled": false }));
}
