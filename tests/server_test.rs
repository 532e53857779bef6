use async_trait::async_trait;
use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use cireta_dashboard::app::analytics_use_case::AnalyticsUseCase;
use cireta_dashboard::app::ports::{HttpClientPort, HttpGetResult};
use cireta_dashboard::app::socials_use_case::SocialsUseCase;
use cireta_dashboard::config::{AnalyticsConfig, Config, SheetsConfig};
use cireta_dashboard::error::{DashboardError, Result};
use cireta_dashboard::server::{create_server, AppState};
use serde_json::{json, Value};
use std::net::{SocketAddr, TcpListener};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

const TEST_KEY: &str = include_str!("fixtures/service_account_key.pem");

/// Sheets export that is never reachable
struct OfflineSheets;

#[async_trait]
impl HttpClientPort for OfflineSheets {
    async fn get(&self, url: &str) -> Result<HttpGetResult> {
        Err(DashboardError::Api { status: 503, message: format!("offline: {}", url) })
    }
}

fn mock_state() -> AppState {
    AppState {
        analytics: Arc::new(AnalyticsUseCase::new(None, AnalyticsConfig::default())),
        socials: Arc::new(SocialsUseCase::new(Arc::new(OfflineSheets), SheetsConfig::default())),
        metrics: None,
    }
}

async fn get(app: Router, uri: &str) -> (StatusCode, HeaderMap, Value) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = hyper::body::to_bytes(resp.into_body()).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, body)
}

#[tokio::test]
async fn test_health_reports_ga_disconnected() {
    let (status, _, body) = get(create_server(mock_state(), None), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["gaConnected"], false);
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_unconfigured_reports_serve_mock_data() {
    let (status, headers, body) = get(create_server(mock_state(), None), "/api/ga/overview").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["x-data-source"], "mock");
    assert_eq!(body["_isLive"], false);
    assert!(body["activeUsers"].as_i64().unwrap() > 0);
    assert!(body.get("_error").is_none());

    let (_, _, body) = get(create_server(mock_state(), None), "/api/ga/sources").await;
    assert!(body["channels"].as_array().unwrap().len() > 0);
    assert!(body["mediums"].is_array());
}

#[tokio::test]
async fn test_unknown_report_is_404() {
    let (status, _, body) = get(create_server(mock_state(), None), "/api/ga/revenue").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("revenue"));
}

#[tokio::test]
async fn test_invalid_date_is_400() {
    let (status, _, body) = get(
        create_server(mock_state(), None),
        "/api/ga/monthly?startDate=last-tuesday&endDate=today",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("last-tuesday"));
}

#[tokio::test]
async fn test_socials_fall_back_to_defaults_when_sheet_offline() {
    let (status, _, body) = get(create_server(mock_state(), None), "/api/sheets/socials").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["_isLive"], false);
    assert!(!body["coldEmails"].as_array().unwrap().is_empty());
    assert!(!body["linkedIn"].as_array().unwrap().is_empty());
    assert!(body["outreachSummary"]["sentEmails"].is_number());
}

#[tokio::test]
async fn test_metrics_without_recorder_is_404() {
    let (status, _, _) = get(create_server(mock_state(), None), "/metrics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let resp = create_server(mock_state(), None)
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/ga/overview")
                .header("Origin", "http://localhost:5173")
                .header("Access-Control-Request-Method", "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_static_dir_is_served_as_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>dashboard</h1>").unwrap();
    let app = create_server(mock_state(), dir.path().to_str());

    let resp = app
        .oneshot(Request::builder().uri("/index.html").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = hyper::body::to_bytes(resp.into_body()).await.unwrap();
    assert_eq!(&bytes[..], b"<h1>dashboard</h1>");
}

/// Stand-in for the OAuth token endpoint and the GA4 Data API.
#[derive(Default)]
struct FakeGoogle {
    token_calls: AtomicUsize,
    report_paths: Mutex<Vec<String>>,
}

async fn fake_token(State(google): State<Arc<FakeGoogle>>, body: String) -> Json<Value> {
    assert!(body.contains("grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer"));
    assert!(body.contains("assertion="));
    google.token_calls.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "access_token": "fake-token", "expires_in": 3600, "token_type": "Bearer" }))
}

async fn fake_run_report(
    State(google): State<Arc<FakeGoogle>>,
    uri: Uri,
    headers: HeaderMap,
    Json(request): Json<Value>,
) -> Response {
    assert_eq!(headers["authorization"], "Bearer fake-token");
    google.report_paths.lock().unwrap().push(uri.path().to_string());

    let dimension = request["dimensions"][0]["name"].as_str().unwrap_or("");
    match dimension {
        "" => Json(json!({
            "rows": [{
                "metricValues": [
                    {"value": "1250"}, {"value": "1800"}, {"value": "5400"}, {"value": "9000"},
                    {"value": "95.5"}, {"value": "0.5"}, {"value": "900"}, {"value": "1100"}
                ]
            }],
            "rowCount": 1
        }))
        .into_response(),
        "country" => Json(json!({
            "rows": [
                {"dimensionValues": [{"value": "United Kingdom"}], "metricValues": [{"value": "500"}]},
                {"dimensionValues": [{"value": "India"}], "metricValues": [{"value": "300"}]}
            ]
        }))
        .into_response(),
        "sessionMedium" => (
            StatusCode::FORBIDDEN,
            Json(json!({"error": {"code": 403, "message": "User does not have sufficient permissions", "status": "PERMISSION_DENIED"}})),
        )
            .into_response(),
        _ => Json(json!({})).into_response(),
    }
}

async fn spawn_fake_google() -> (SocketAddr, Arc<FakeGoogle>) {
    let google = Arc::new(FakeGoogle::default());
    let app = Router::new()
        .route("/token", post(fake_token))
        .fallback(fake_run_report)
        .with_state(google.clone());

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        hyper::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service())
            .await
            .unwrap();
    });
    (addr, google)
}

/// App wired exactly as `serve` does, pointed at the fake Google endpoints.
async fn live_app() -> (Router, Arc<FakeGoogle>, tempfile::TempDir) {
    let (addr, google) = spawn_fake_google().await;
    let dir = tempfile::tempdir().unwrap();
    let credentials = dir.path().join("ga-credentials.json");
    let key = json!({
        "type": "service_account",
        "client_email": "dashboard@cireta.iam.gserviceaccount.com",
        "private_key": TEST_KEY,
    });
    std::fs::write(&credentials, key.to_string()).unwrap();

    let mut config = Config::default();
    config.analytics.credentials_file = credentials.to_string_lossy().into_owned();
    config.analytics.api_base = format!("http://{}/v1beta", addr);
    config.analytics.token_uri = format!("http://{}/token", addr);

    let state = AppState::from_config(&config, None).unwrap();
    (create_server(state, None), google, dir)
}

#[tokio::test]
async fn test_live_overview_and_countries() {
    let (app, google, _dir) = live_app().await;

    let (status, _, body) = get(app.clone(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["gaConnected"], true);

    let (status, headers, body) = get(app.clone(), "/api/ga/overview?startDate=30daysAgo").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["x-data-source"], "live");
    assert_eq!(body["_isLive"], true);
    assert_eq!(body["activeUsers"], 1250);
    assert_eq!(body["avgSessionDuration"], 95.5);
    assert_eq!(body["bounceRate"], 50.0);
    assert_eq!(body["engagedSessions"], 1100);

    let (_, headers, body) = get(app, "/api/ga/countries").await;
    assert_eq!(headers["x-data-source"], "live");
    let countries = body.as_array().unwrap();
    assert_eq!(countries.len(), 2);
    assert_eq!(countries[0]["country"], "United Kingdom");
    assert_eq!(countries[0]["users"], 500);
    assert!(countries[0]["fill"].as_str().unwrap().starts_with('#'));

    // token is cached across reports
    assert_eq!(google.token_calls.load(Ordering::SeqCst), 1);
    let paths = google.report_paths.lock().unwrap().clone();
    assert_eq!(
        paths,
        vec![
            "/v1beta/properties/472271698:runReport".to_string(),
            "/v1beta/properties/461877498:runReport".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_live_failures_degrade_to_mock() {
    let (app, _google, _dir) = live_app().await;

    // one of the three sub-queries is rejected
    let (status, headers, body) = get(app.clone(), "/api/ga/sources").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["x-data-source"], "fallback");
    assert!(!body["channels"].as_array().unwrap().is_empty());

    // GA answers without rows
    let (status, headers, body) = get(app, "/api/ga/devices").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["x-data-source"], "empty");
    assert!(!body.as_array().unwrap().is_empty());
}
