//! Router tests against a temporary data directory

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use asthma_guard_core::logic::model::{LogisticClassifier, LogisticModel};
use asthma_guard_core::{FeatureSchema, JsonStore, ModelConfig, RiskScorer};

use crate::config::Config;
use crate::{create_router, AppState};

/// p = sigmoid(dust - 100)
fn dust_scorer() -> RiskScorer {
    let model = LogisticModel {
        coefficients: vec![1.0],
        intercept: -100.0,
        scaler_mean: None,
        scaler_scale: None,
    };
    RiskScorer::ready(
        Arc::new(LogisticClassifier::new(model).unwrap()),
        FeatureSchema::new(["dust"]),
    )
}

fn app(dir: &std::path::Path, scorer: RiskScorer) -> Router {
    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        data_dir: dir.to_path_buf(),
        model: ModelConfig::in_dir(dir),
        graph_window: 300,
        environment: "test".to_string(),
    };

    create_router(AppState {
        store: Arc::new(JsonStore::open(dir)),
        scorer: Arc::new(scorer),
        config,
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_sensor_high_risk_is_logged() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(dir.path(), dust_scorer());

    let (status, body) = send(&app, post_json("/api/sensor", r#"{"temperature": 30.2, "humidity": 60, "dust": 250}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["label"], "HIGH RISK");
    assert!(body["probability"].as_f64().unwrap() > 0.99);

    let (_, attacks) = send(&app, get("/attack_history")).await;
    let (_, alerts) = send(&app, get("/alerts")).await;
    assert_eq!(attacks.as_array().unwrap().len(), 1);
    assert_eq!(alerts[0]["message"], "HIGH Immediate Asthma Risk Detected!");

    let (_, dashboard) = send(&app, get("/dashboard")).await;
    assert_eq!(dashboard["latest"]["dust_equiv"], 250.0);
    assert_eq!(dashboard["latest"]["mq2"], 1);
    assert_eq!(dashboard["latest_attack"]["risk_label"], "HIGH RISK");
}

#[tokio::test]
async fn test_sensor_without_content_type() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(dir.path(), dust_scorer());

    let request = Request::post("/api/sensor")
        .body(Body::from(r#"{"dust_equiv": "5"}"#))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "LOW RISK");

    let (_, graphs) = send(&app, get("/graphs")).await;
    assert_eq!(graphs.as_array().unwrap().len(), 1);
    assert_eq!(graphs[0]["dust_equiv"], 5.0);
}

#[tokio::test]
async fn test_sensor_rejects_non_numeric() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(dir.path(), dust_scorer());

    let (status, body) = send(&app, post_json("/api/sensor", r#"{"humidity": "wet"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(!dir.path().join("readings.json").exists());
}

#[tokio::test]
async fn test_predict_without_model_is_unknown() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(dir.path(), RiskScorer::unavailable("no model"));

    let (status, body) = send(&app, post_json("/predict", r#"{"dust": 500}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "UNKNOWN");
    assert!(body["probability"].is_null());

    let (_, health) = send(&app, get("/health")).await;
    assert_eq!(health["status"], "degraded");
    assert_eq!(health["model"]["model_loaded"], false);
}

#[tokio::test]
async fn test_health_degraded_with_empty_schema() {
    let dir = tempfile::tempdir().unwrap();
    let model = LogisticModel {
        coefficients: vec![],
        intercept: 5.0,
        scaler_mean: None,
        scaler_scale: None,
    };
    let scorer = RiskScorer::ready(
        Arc::new(LogisticClassifier::new(model).unwrap()),
        FeatureSchema::new(Vec::<String>::new()),
    );
    let app = app(dir.path(), scorer);

    let (_, health) = send(&app, get("/health")).await;
    assert_eq!(health["status"], "degraded");
    assert_eq!(health["model"]["model_loaded"], true);
    assert_eq!(health["model"]["unavailable_reason"], "feature schema is empty");
}

#[tokio::test]
async fn test_profile_update_redirects_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(dir.path(), dust_scorer());

    let request = Request::post("/update_profile")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("name=Asha&age=abc&smoker=Active+smoker&occupation=Factory%2FHeavy"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/patient_profile");

    let (_, profile) = send(&app, get("/patient_profile")).await;
    assert_eq!(profile["name"], "Asha");
    assert_eq!(profile["age"], 21);
    assert_eq!(profile["smoker"], "Active smoker");
    assert_eq!(profile["occupation"], "Factory/Heavy");
}

#[tokio::test]
async fn test_profile_form_validation() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(dir.path(), dust_scorer());

    let request = Request::post("/update_profile")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("name="))
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
