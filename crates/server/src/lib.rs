//! HTTP surface for the trade risk engine
//!
//! Thin axum layer over the `engine` crate: request validation, DTO
//! mapping, and JSON response shaping. All classification and aggregation
//! logic lives in the engine.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use engine::{
    validate_analyze, validate_classify, AnalyzeRequest, ClassifyRequest, TradeAnalyzer,
    TradeClassifier, ValidationError,
};

pub const APP_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "-", env!("GIT_HASH"));

/// Shared handler state
///
/// The rule set is built exactly once at startup; classifier and analyzer
/// are immutable afterwards and shared across all requests.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<TradeClassifier>,
    pub analyzer: Arc<TradeAnalyzer>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            classifier: Arc::new(TradeClassifier::with_default_rules()),
            analyzer: Arc::new(TradeAnalyzer::with_default_rules()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(api_health))
        .route("/trades/classify", post(api_classify))
        .route("/trades/analyze", post(api_analyze))
        .with_state(state);

    Router::new().nest("/api", api_routes).layer(cors)
}

fn validation_response(error: ValidationError) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "errors": error.errors })),
    )
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health
async fn api_health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "trade-risk",
        "version": APP_VERSION,
    }))
}

/// POST /api/trades/classify — classify a batch of trades
async fn api_classify(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    info!(trades = request.trades.len(), "Classifying trade batch");

    validate_classify(&request).map_err(validation_response)?;

    let trades = request.into_trades();
    let categories = state.classifier.classify_batch(&trades);

    info!(trades = trades.len(), "Classification complete");

    Ok(Json(json!({ "categories": categories })))
}

/// POST /api/trades/analyze — classify and aggregate a batch of trades
async fn api_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    info!(trades = request.trades.len(), "Analyzing trade batch");

    validate_analyze(&request).map_err(validation_response)?;

    let trades = request.into_trades();
    let report = state.analyzer.analyze(&trades);

    info!(
        trades = trades.len(),
        elapsed_ms = report.processing_time_ms,
        "Analysis complete"
    );

    Ok(Json(json!({
        "categories": report.categories,
        "summary": report.summary,
        "processingTimeMs": report.processing_time_ms,
    })))
}
