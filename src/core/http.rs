//! HTTP endpoint server using Axum
//!
//! Thin glue over the analysis engine: request validation in, plain
//! structured data out. The engine itself stays transport-agnostic.

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{get, post, put},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::config::Config;
use crate::engine::{Analyzer, BatchOrchestrator};
use crate::error::EngineError;
use crate::metrics::Metrics;
use crate::models::candle::Candle;
use crate::models::trade::{RiskProfile, TradeProposal};
use crate::risk::portfolio::aggregate_risk;
use crate::risk::RiskValidator;
use crate::services::market_data::{InMemoryMarketData, MarketDataProvider};

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub config: Arc<Config>,
    pub provider: Arc<InMemoryMarketData>,
    pub analyzer: Arc<Analyzer>,
    pub validator: Arc<RiskValidator>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, prometheus::Error> {
        let analyzer = Arc::new(Analyzer::new(&config));
        let validator = Arc::new(RiskValidator::new(config.risk.clone()));
        Ok(Self {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics: Arc::new(Metrics::new()?),
            start_time: Arc::new(Instant::now()),
            config: Arc::new(config),
            provider: Arc::new(InMemoryMarketData::new()),
            analyzer,
            validator,
        })
    }
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

type ApiError = (StatusCode, Json<Value>);

/// Map an engine error onto an HTTP response.
fn engine_error_response(error: &EngineError) -> ApiError {
    let status = match error {
        EngineError::InvalidInput(message) if message.contains("not found") => {
            StatusCode::NOT_FOUND
        }
        EngineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        EngineError::InsufficientData { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
    };
    (
        status,
        Json(json!({
            "error": { "kind": error.kind(), "message": error.to_string() }
        })),
    )
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "sigvana-signal-engine"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    state.metrics.http_requests_in_flight.dec();

    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Deserialize)]
struct CandlePayload {
    timestamp: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

/// Load a candle series for a symbol into the in-memory provider.
async fn put_series(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Json(payload): Json<Vec<CandlePayload>>,
) -> Result<Json<Value>, ApiError> {
    let candles: Vec<Candle> = payload
        .into_iter()
        .map(|c| {
            Candle::new(
                symbol.clone(),
                c.timestamp,
                c.open,
                c.high,
                c.low,
                c.close,
                c.volume,
            )
        })
        .collect();

    let count = state
        .provider
        .load_series(symbol.clone(), candles)
        .await
        .map_err(|e| engine_error_response(&e))?;

    Ok(Json(json!({ "symbol": symbol, "candles": count })))
}

/// Full analysis (indicators, levels, patterns, signals) for one symbol.
async fn get_analysis(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let candles = state
        .provider
        .get_candles(&symbol, state.config.batch.candle_limit)
        .await
        .map_err(|e| engine_error_response(&e))?;

    let report = state.analyzer.analyze(&candles).map_err(|e| {
        state.metrics.analysis_failures_total.inc();
        error!(symbol = %symbol, error = %e, "analysis failed");
        engine_error_response(&e)
    })?;
    state.metrics.analyses_total.inc();

    serde_json::to_value(&report)
        .map(Json)
        .map_err(|e| {
            error!(symbol = %symbol, error = %e, "report serialization failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": { "kind": "internal", "message": "serialization failed" } })),
            )
        })
}

#[derive(Debug, Deserialize)]
struct ValidateTradeRequest {
    trade: TradeProposal,
    profile: RiskProfile,
}

/// Validate and size a proposed trade against a risk profile.
async fn post_validate_trade(
    State(state): State<AppState>,
    Json(request): Json<ValidateTradeRequest>,
) -> Result<Json<Value>, ApiError> {
    let assessment = state
        .validator
        .validate(&request.trade, &request.profile)
        .map_err(|e| engine_error_response(&e))?;

    Ok(Json(json!({
        "symbol": request.trade.symbol,
        "position_size": assessment.position_size,
        "risk_reward_ratio": assessment.risk_reward_ratio,
        "validation": assessment.validation,
    })))
}

#[derive(Debug, Deserialize)]
struct BatchRequest {
    symbols: Vec<String>,
}

/// Analyze many symbols concurrently; failures are reported per symbol.
async fn post_batch_analysis(
    State(state): State<AppState>,
    Json(request): Json<BatchRequest>,
) -> Result<Json<Value>, ApiError> {
    let provider: Arc<dyn MarketDataProvider> = state.provider.clone();
    let orchestrator =
        BatchOrchestrator::new(state.analyzer.clone(), provider, &state.config.batch);

    let results = orchestrator.run(&request.symbols).await;
    state.metrics.batch_runs_total.inc();

    let mut body = serde_json::Map::new();
    for (symbol, outcome) in results {
        let entry = match outcome {
            Ok(report) => json!({ "report": report }),
            Err(failure) => json!({
                "error": {
                    "kind": failure.source.kind(),
                    "message": failure.source.to_string(),
                }
            }),
        };
        body.insert(symbol, entry);
    }

    Ok(Json(json!({ "results": Value::Object(body) })))
}

#[derive(Debug, Deserialize)]
struct RiskReportRequest {
    trades: Vec<TradeProposal>,
    profile: RiskProfile,
}

/// Aggregate portfolio risk across open trade proposals.
async fn post_risk_report(
    State(state): State<AppState>,
    Json(request): Json<RiskReportRequest>,
) -> Result<Json<Value>, ApiError> {
    let report = aggregate_risk(
        &request.trades,
        &request.profile,
        state.validator.limits(),
    )
    .map_err(|e| engine_error_response(&e))?;

    Ok(Json(json!({ "risk_report": report })))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/series/{symbol}", put(put_series))
        .route("/api/analysis/{symbol}", get(get_analysis))
        .route("/api/validate-trade", post(post_validate_trade))
        .route("/api/batch-analysis", post(post_batch_analysis))
        .route("/api/risk-report", post(post_risk_report))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let port = config.port;
    let state = AppState::new(config)?;
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
