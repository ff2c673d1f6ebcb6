//! HTTP server integration tests
//!
//! These tests drive the full router with `oneshot` requests against a
//! resolver backed by temp files and a wiremock remote endpoint.

mod common;

use atera_compact_calculator::{server::app::create_app_with_resolver, types::*};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{MockData, MockServerFactory, TestConfig, TestUtils};
use pretty_assertions::assert_eq;
use serde_json::json;
use tower::ServiceExt;

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap()
}

fn with_json(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_server_ping_endpoint() {
    let fixture = TestConfig::without_local();
    let (resolver, _) = fixture.resolver();
    let app = create_app_with_resolver(resolver);

    let response = app.oneshot(get("/ping")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let ping: PingResponse = serde_json::from_value(TestUtils::json_body(response).await).unwrap();
    assert!(!ping.version.is_empty());
}

#[tokio::test]
async fn test_calculator_config_with_remote_override() {
    TestUtils::init_logger();
    let server = MockServerFactory::serving(MockData::remote_document(), 1).await;
    let fixture = TestConfig::with_local(&MockData::local_document()).with_remote(server.uri());
    let (resolver, _) = fixture.resolver();
    let app = create_app_with_resolver(resolver);

    let response = app
        .clone()
        .oneshot(get("/atera/v1/calculator-config"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = TestUtils::json_body(response).await;
    assert_eq!(body["prefix"], json!("€"));
    assert_eq!(body["ctaHref"], json!("https://www.atera.com/free-trial"));
    assert_eq!(body["theme"], json!("dark"));
    assert_eq!(body["sliders"].as_array().unwrap().len(), 4);
    assert_eq!(body["sliders"][0]["max"], json!(50.0));
    assert_eq!(body["sliders"][3]["id"], json!("backupSeats"));

    // second request is served from the cache
    let response = app.oneshot(get("/atera/v1/calculator-config")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_calculator_config_unavailable_is_not_found() {
    let fixture = TestConfig::without_local();
    let (resolver, _) = fixture.resolver();
    let app = create_app_with_resolver(resolver);

    let response = app.oneshot(get("/atera/v1/calculator-config")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let error: ErrorResponse = serde_json::from_value(TestUtils::json_body(response).await).unwrap();
    assert_eq!(error.context.as_deref(), Some("config_resolution"));
    assert!(error.details.is_some());
}

#[tokio::test]
async fn test_calculator_config_passes_upstream_status() {
    let server = MockServerFactory::failing(502).await;
    let fixture = TestConfig::without_local().with_remote(server.uri());
    let (resolver, _) = fixture.resolver();
    let app = create_app_with_resolver(resolver);

    let response = app.oneshot(get("/atera/v1/calculator-config")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_calculator_config_maps_upstream_success_status_to_bad_gateway() {
    let server = MockServerFactory::failing(202).await;
    let fixture = TestConfig::without_local().with_remote(server.uri());
    let (resolver, _) = fixture.resolver();
    let app = create_app_with_resolver(resolver);

    let response = app.oneshot(get("/atera/v1/calculator-config")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = TestUtils::json_body(response).await;
    assert_eq!(body["details"]["category"], "remote_http");
}

#[tokio::test]
async fn test_fallback_config_endpoint() {
    let fixture = TestConfig::without_local();
    let (resolver, _) = fixture.resolver();
    let app = create_app_with_resolver(resolver);

    let response = app
        .oneshot(get("/atera/v1/calculator-config/fallback"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let config: CalculatorConfig =
        serde_json::from_value(TestUtils::json_body(response).await).unwrap();
    assert_eq!(config, CalculatorConfig::fallback());
}

#[tokio::test]
async fn test_estimate_query_and_body() {
    let fixture = TestConfig::with_local(&MockData::local_document());
    let (resolver, _) = fixture.resolver();
    let app = create_app_with_resolver(resolver);

    let response = app
        .clone()
        .oneshot(get(
            "/atera/v1/estimate?technicians=10&endpoints=1200&endpointRate=7",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = TestUtils::json_body(response).await;
    assert_eq!(body["figures"]["savings"], json!(82920.0));
    assert_eq!(body["display"]["savings"], json!("$82,920"));
    assert_eq!(body["sliders"][0]["progress"], json!(50.0));
    assert_eq!(body["sliders"][2]["label"], json!("Cost per endpoint"));

    // absent keys take slider defaults, junk values count as 0
    let response = app
        .oneshot(with_json(
            "POST",
            "/atera/v1/estimate",
            json!({"technicians": "many"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = TestUtils::json_body(response).await;
    assert_eq!(
        body["inputs"],
        json!({"technicians": 0.0, "endpoints": 1200.0, "endpointRate": 7.0})
    );
    assert_eq!(body["figures"]["ateraAnnual"], json!(0.0));
}

#[tokio::test]
async fn test_estimate_rejects_non_object_body() {
    let fixture = TestConfig::without_local();
    let (resolver, _) = fixture.resolver();
    let app = create_app_with_resolver(resolver);

    let response = app
        .oneshot(with_json("POST", "/atera/v1/estimate", json!([1, 2])))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_settings_update_round_trip() {
    let fixture = TestConfig::with_local(&MockData::local_document());
    let (resolver, _) = fixture.resolver();
    let app = create_app_with_resolver(resolver);

    let response = app
        .clone()
        .oneshot(with_json(
            "PUT",
            "/atera/v1/settings",
            json!({"remote_url": "  https://cdn.example.com/calc.json "}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/atera/v1/settings")).await.unwrap();
    let setting: RemoteUrlSetting =
        serde_json::from_value(TestUtils::json_body(response).await).unwrap();
    assert_eq!(setting.remote_url, "https://cdn.example.com/calc.json");

    let response = app
        .clone()
        .oneshot(with_json(
            "PUT",
            "/atera/v1/settings",
            json!({"remote_url": "ftp://cdn.example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(with_json("PUT", "/atera/v1/settings", json!({"remote_url": null})))
        .await
        .unwrap();
    let setting: RemoteUrlSetting =
        serde_json::from_value(TestUtils::json_body(response).await).unwrap();
    assert_eq!(setting.remote_url, "");
}

#[tokio::test]
async fn test_invalidate_cache_refetches() {
    let server = MockServerFactory::serving(MockData::remote_document(), 2).await;
    let fixture = TestConfig::with_local(&MockData::local_document()).with_remote(server.uri());
    let (resolver, _) = fixture.resolver();
    let app = create_app_with_resolver(resolver);

    app.clone()
        .oneshot(get("/atera/v1/calculator-config"))
        .await
        .unwrap();

    let request = Request::builder()
        .uri("/atera/v1/invalidate_cache")
        .method("POST")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get("/atera/v1/calculator-config")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route() {
    let fixture = TestConfig::without_local();
    let (resolver, _) = fixture.resolver();
    let app = create_app_with_resolver(resolver);

    let response = app.oneshot(get("/atera/v1/unknown")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_slow_resolution_hits_server_timeout() {
    let server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .respond_with(
            wiremock::ResponseTemplate::new(200)
                .set_body_json(MockData::remote_document())
                .set_delay(std::time::Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let mut fixture = TestConfig::with_local(&MockData::local_document()).with_remote(server.uri());
    fixture.settings.server.timeout = std::time::Duration::from_millis(100);
    let (resolver, _) = fixture.resolver();
    let app = create_app_with_resolver(resolver);

    let response = app
        .clone()
        .oneshot(get("/atera/v1/calculator-config"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

    // requests that finish in time are unaffected
    let response = app.oneshot(get("/ping")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
