//! HTTP API integration tests.
//!
//! Drive the router with `tower::ServiceExt::oneshot`; no sockets involved.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use payoff_engine::config::Config;
use payoff_engine::presets::PresetLibrary;
use payoff_engine::server::response::{
    ErrorResponse, HealthResponse, PayoffResponse, PresetListResponse,
};
use payoff_engine::server::{AppState, create_router};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

fn app() -> Router {
    let presets = PresetLibrary::builtin().unwrap();
    create_router(AppState::new(&Config::default(), presets))
}

async fn get(uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn post(uri: &str, json: &serde_json::Value) -> (StatusCode, Vec<u8>) {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(json).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

fn parse<T: DeserializeOwned>(body: &[u8]) -> T {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn health_check_returns_ok() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);

    let health: HealthResponse = parse(&body);
    assert_eq!(health.status, "healthy");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn lists_builtin_presets() {
    let (status, body) = get("/api/v1/presets").await;
    assert_eq!(status, StatusCode::OK);

    let list: PresetListResponse = parse(&body);
    assert_eq!(list.presets.len(), 8);
    assert!(list.presets.iter().any(|p| p.name == "Bull Call Spread"));
}

#[tokio::test]
async fn gets_preset_by_name() {
    let (status, body) = get("/api/v1/presets/Iron%20Condor").await;
    assert_eq!(status, StatusCode::OK);

    let preset: payoff_engine::Preset = parse(&body);
    assert_eq!(preset.legs.len(), 4);
}

#[tokio::test]
async fn unknown_preset_is_not_found() {
    let (status, body) = get("/api/v1/presets/jade-lizard").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let error: ErrorResponse = parse(&body);
    assert_eq!(error.code, "NOT_FOUND");
}

#[tokio::test]
async fn computes_bull_call_spread() {
    let request = serde_json::json!({
        "legs": [
            { "kind": "call", "direction": "long", "strike": 100.0, "premium": 5.0, "quantity": 1 },
            { "kind": "call", "direction": "short", "strike": 110.0, "premium": 2.0, "quantity": 1 }
        ],
        "current_price": 105.0
    });

    let (status, body) = post("/api/v1/payoff", &request).await;
    assert_eq!(status, StatusCode::OK);

    let response: PayoffResponse = parse(&body);
    assert_eq!(response.samples.len(), 500);
    assert_eq!(response.break_evens.len(), 1);
    assert!((response.break_evens[0] - 103.0).abs() < 0.25);

    let current = response.current.unwrap();
    assert_eq!(current.price, 105.0);
    assert!((current.payoff - 2.0).abs() < 1e-9);

    let marker = response.chart.current.unwrap();
    assert!((marker.payoff - 2.0).abs() < 0.25);
    assert!((marker.line_low - -3.0).abs() < 1e-9);
    assert!((marker.line_high - 7.0).abs() < 1e-9);
}

#[tokio::test]
async fn computes_preset_on_explicit_grid() {
    let request = serde_json::json!({
        "preset": "Iron Condor",
        "grid": { "prices": [80.0, 92.0, 100.0, 108.0, 120.0] },
        "style": "sign_segmented"
    });

    let (status, body) = post("/api/v1/payoff", &request).await;
    assert_eq!(status, StatusCode::OK);

    let response: PayoffResponse = parse(&body);
    let payoffs: Vec<f64> = response.samples.iter().map(|s| s.payoff).collect();
    assert_eq!(payoffs, vec![-3.0, -1.0, 2.0, -1.0, -3.0]);
    // Coarse grid: crossings interpolated inside (92, 100) and (100, 108).
    assert_eq!(response.break_evens.len(), 2);
    assert_eq!(response.chart.series.len(), 3);
}

#[tokio::test]
async fn computes_range_grid() {
    let request = serde_json::json!({
        "legs": [{ "kind": "put", "direction": "long", "strike": 100.0, "premium": 5.0 }],
        "grid": { "lower": 80.0, "upper": 120.0, "samples": 41 }
    });

    let (status, body) = post("/api/v1/payoff", &request).await;
    assert_eq!(status, StatusCode::OK);

    let response: PayoffResponse = parse(&body);
    assert_eq!(response.samples.len(), 41);
    // 95 is a grid point with exactly zero payoff: not reported as a crossing.
    assert!(response.break_evens.is_empty());
}

#[tokio::test]
async fn invalid_leg_is_bad_request() {
    let request = serde_json::json!({
        "legs": [{ "kind": "forward", "direction": "long", "strike": 100.0, "premium": 5.0 }]
    });

    let (status, body) = post("/api/v1/payoff", &request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let error: ErrorResponse = parse(&body);
    assert_eq!(error.code, "INVALID_ARGUMENT");
    assert!(error.message.contains("leg 0"));
}

#[tokio::test]
async fn unordered_grid_is_bad_request() {
    let request = serde_json::json!({
        "preset": "Long Call",
        "grid": { "prices": [110.0, 100.0] }
    });

    let (status, _) = post("/api/v1/payoff", &request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_portfolio_is_ok() {
    let (status, body) = post("/api/v1/payoff", &serde_json::json!({ "legs": [] })).await;
    assert_eq!(status, StatusCode::OK);

    let response: PayoffResponse = parse(&body);
    assert!(response.samples.is_empty());
    assert!(response.break_evens.is_empty());
}

#[tokio::test]
async fn oversized_range_grid_is_bad_request() {
    let request = serde_json::json!({
        "preset": "Long Call",
        "grid": { "lower": 1.0, "upper": 2.0, "samples": 1_152_921_504_606_846_975_u64 }
    });

    let (status, body) = post("/api/v1/payoff", &request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let error: ErrorResponse = parse(&body);
    assert_eq!(error.code, "INVALID_ARGUMENT");
    assert!(error.message.contains("limit is 10000"));
}

#[tokio::test]
async fn overflowing_legs_are_bad_request() {
    let leg = serde_json::json!({ "kind": "call", "direction": "long", "strike": 100.0, "premium": 1e308 });
    let request = serde_json::json!({
        "legs": [leg.clone(), leg],
        "grid": { "prices": [90.0, 110.0] }
    });

    let (status, body) = post("/api/v1/payoff", &request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let error: ErrorResponse = parse(&body);
    assert_eq!(error.code, "INVALID_ARGUMENT");
    assert!(error.message.contains("not finite"));
}

#[tokio::test]
async fn malformed_body_uses_error_shape() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/payoff")
                .header("content-type", "application/json")
                .body(Body::from("{\"legs\": ["))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: ErrorResponse = parse(&body);
    assert_eq!(error.code, "INVALID_ARGUMENT");
}

#[tokio::test]
async fn negative_quantity_uses_error_shape() {
    let request = serde_json::json!({
        "legs": [{ "kind": "call", "direction": "long", "strike": 100.0, "premium": 5.0, "quantity": -1 }]
    });

    let (status, body) = post("/api/v1/payoff", &request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let error: ErrorResponse = parse(&body);
    assert_eq!(error.code, "INVALID_ARGUMENT");
    assert!(error.message.starts_with("Invalid request"));
}
