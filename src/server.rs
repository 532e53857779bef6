use crate::app::analytics_use_case::AnalyticsUseCase;
use crate::app::socials_use_case::SocialsUseCase;
use crate::config::Config;
use crate::error::DashboardError;
use crate::infra::ga_client::GaClient;
use crate::infra::http_client::ReqwestHttp;
use crate::reports::{DateRange, ReportKind};
use axum::{
    extract::{Path, Query, State},
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::{SecondsFormat, Utc};
use hyper::Server;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{info, warn};

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub analytics: Arc<AnalyticsUseCase>,
    pub socials: Arc<SocialsUseCase>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Wire the production adapters from configuration.
    pub fn from_config(config: &Config, metrics: Option<PrometheusHandle>) -> crate::error::Result<Self> {
        let ga = GaClient::from_config(&config.analytics)?;
        let analytics = AnalyticsUseCase::new(
            ga.map(|client| Arc::new(client) as Arc<dyn crate::app::ports::AnalyticsPort>),
            config.analytics.clone(),
        );
        let http = ReqwestHttp::new(Duration::from_secs(config.sheets.timeout_seconds))?;
        let socials = SocialsUseCase::new(Arc::new(http), config.sheets.clone());
        Ok(Self { analytics: Arc::new(analytics), socials: Arc::new(socials), metrics })
    }
}

fn error_response(status: StatusCode, err: DashboardError) -> Response {
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

/// Health check endpoint
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "gaConnected": state.analytics.is_connected(),
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }))
}

async fn ga_report(
    State(state): State<AppState>,
    Path(report): Path<String>,
    Query(range): Query<DateRange>,
) -> Response {
    let kind = match report.parse::<ReportKind>() {
        Ok(kind) => kind,
        Err(e) => return error_response(StatusCode::NOT_FOUND, e),
    };
    if let Err(e) = range.validate() {
        return error_response(StatusCode::BAD_REQUEST, e);
    }

    let outcome = state.analytics.report(kind, &range).await;
    ([("x-data-source", outcome.source.as_str())], Json(outcome.data)).into_response()
}

async fn socials(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.socials.load().await)
}

async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => ([(CONTENT_TYPE, "text/plain; version=0.0.4")], handle.render()).into_response(),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed").into_response(),
    }
}

/// Create the HTTP router with all routes
pub fn create_server(state: AppState, static_dir: Option<&str>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    let mut router = Router::new()
        .route("/api/health", get(health))
        .route("/api/ga/:report", get(ga_report))
        .route("/api/sheets/socials", get(socials))
        .route("/metrics", get(metrics));

    // Pre-built frontend
    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router.layer(ServiceBuilder::new().layer(cors)).with_state(state)
}

fn print_setup_instructions(config: &Config) {
    println!("⚠️  Google Analytics credentials not found; /api/ga/* will serve mock data.");
    println!("   To connect GA4:");
    println!("   1. Create a service account in Google Cloud and enable the Analytics Data API");
    println!(
        "   2. Grant it Viewer access on properties {} and {}",
        config.analytics.property_id,
        crate::constants::MARKETING_PROPERTY_ID
    );
    println!(
        "   3. Set GA_CLIENT_EMAIL and GA_PRIVATE_KEY, or save the key JSON as {}",
        config.analytics.credentials_file
    );
}

/// Start the HTTP server on the configured address
pub async fn start_server(config: &Config, state: AppState) -> anyhow::Result<()> {
    if !state.analytics.is_connected() {
        warn!("GA credentials not configured, serving mock analytics");
        print_setup_instructions(config);
    }

    let app = create_server(state, config.server.static_dir.as_deref());
    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port).parse()?;
    let port = addr.port();

    info!("Dashboard API listening on {}", addr);
    println!("🚀 Dashboard API running on http://localhost:{port}");
    println!("💚 Health check: http://localhost:{port}/api/health");
    println!("📈 GA reports:   http://localhost:{port}/api/ga/overview");
    println!("📣 Socials:      http://localhost:{port}/api/sheets/socials");

    Server::bind(&addr).serve(app.into_make_service()).await?;

    Ok(())
}
