// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// Everything under `/api/` is either a proxy of the market-data API or a view
// over data derived from it. Any other path is served from the static
// directory, with `/` resolving to `index.html`.
//
// CORS is permissive: the web clients are served from other origins during
// development.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::api::error::ApiError;
use crate::app_state::AppState;
use crate::coingecko::{search_coins, MarketCoin};
use crate::indicators::{analyze_detailed, Unavailable};
use crate::types::{prices_of, Indicator};

/// Longest day range accepted on chart and indicator requests.
const MAX_DAYS: u32 = 3650;
const MAX_COIN_ID_LEN: usize = 100;

// =============================================================================
// Router construction
// =============================================================================

/// Build the full router with CORS, request tracing, static files and state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_files = ServeDir::new(&state.runtime_config.static_dir);

    Router::new()
        // ── Proxy ───────────────────────────────────────────────────
        .route("/api/top10", get(top10))
        .route("/api/news", get(news))
        .route("/api/coins", get(coins))
        .route("/api/chart/:id", get(chart))
        // ── Derived ─────────────────────────────────────────────────
        .route("/api/indicators/:id", get(indicators))
        .route("/api/search", get(search))
        .route("/api/dashboard", get(dashboard))
        .route("/api/health", get(health))
        // ── Static files ────────────────────────────────────────────
        .fallback_service(static_files)
        // ── Middleware & State ──────────────────────────────────────
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Input validation
// =============================================================================

/// Coin ids are lowercase slugs such as `bitcoin` or `usd-coin`.
fn validate_coin_id(id: &str) -> Result<(), ApiError> {
    let ok = !id.is_empty()
        && id.len() <= MAX_COIN_ID_LEN
        && !id.contains("..")
        && !id.starts_with('.')
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.'));
    if ok {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("invalid coin id: '{id}'")))
    }
}

/// `days` is kept as raw text so malformed values get the JSON error body
/// instead of the extractor's plain-text rejection.
#[derive(Debug, Deserialize)]
struct DaysQuery {
    #[serde(default)]
    days: Option<String>,
}

fn resolve_days(requested: Option<&str>, default: u32) -> Result<u32, ApiError> {
    let Some(raw) = requested else {
        return Ok(default);
    };
    match raw.parse::<u32>() {
        Ok(d) if (1..=MAX_DAYS).contains(&d) => Ok(d),
        _ => Err(ApiError::BadRequest(format!(
            "days must be an integer between 1 and {MAX_DAYS}, got '{raw}'"
        ))),
    }
}

// =============================================================================
// Proxy endpoints
// =============================================================================

async fn top10(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let coins = state
        .client
        .top_markets()
        .await
        .map_err(ApiError::upstream("top coins"))?;
    Ok(Json(coins))
}

async fn news(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let body = state
        .client
        .news()
        .await
        .map_err(ApiError::upstream("news"))?;
    Ok(Json(body))
}

async fn coins(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let body = state
        .client
        .coin_list()
        .await
        .map_err(ApiError::upstream("coin list"))?;
    Ok(Json(body))
}

async fn chart(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(q): Query<DaysQuery>,
) -> Result<impl IntoResponse, ApiError> {
    validate_coin_id(&id)?;
    let days = resolve_days(q.days.as_deref(), state.runtime_config.chart_days)?;
    let body = state
        .client
        .market_chart(&id, days)
        .await
        .map_err(ApiError::upstream("chart data"))?;
    Ok(Json(body))
}

// =============================================================================
// Indicators
// =============================================================================

#[derive(Debug, Serialize)]
struct IndicatorsResponse {
    id: String,
    days: u32,
    points: usize,
    /// Timestamp of the newest price point.
    as_of: Option<DateTime<Utc>>,
    indicators: Vec<Indicator>,
    unavailable: Vec<Unavailable>,
}

async fn indicators(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(q): Query<DaysQuery>,
) -> Result<impl IntoResponse, ApiError> {
    validate_coin_id(&id)?;
    let days = resolve_days(q.days.as_deref(), state.runtime_config.indicator_days)?;
    let points = state
        .client
        .price_history(&id, days)
        .await
        .map_err(ApiError::upstream("chart data"))?;

    let outcomes = analyze_detailed(&prices_of(&points));
    let unavailable: Vec<Unavailable> = outcomes.iter().filter_map(|o| o.unavailable()).collect();
    let indicators: Vec<Indicator> = outcomes.into_iter().filter_map(|o| o.result.ok()).collect();

    debug!(
        id = %id,
        points = points.len(),
        available = indicators.len(),
        "indicators computed"
    );

    Ok(Json(IndicatorsResponse {
        as_of: points.last().and_then(|p| p.datetime()),
        points: points.len(),
        id,
        days,
        indicators,
        unavailable,
    }))
}

// =============================================================================
// Search & dashboard
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    if query.q.trim().is_empty() {
        return Ok(Json(Vec::<MarketCoin>::new()));
    }
    let coins = state
        .client
        .top_markets()
        .await
        .map_err(ApiError::upstream("top coins"))?;
    let results = search_coins(&coins, &query.q)
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();
    Ok(Json(results))
}

async fn dashboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.dashboard_snapshot())
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    state_version: u64,
    uptime_secs: u64,
    server_time: i64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        state_version: state.current_state_version(),
        uptime_secs: state.uptime_secs(),
        server_time: Utc::now().timestamp_millis(),
    })
}
