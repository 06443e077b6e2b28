//! Fake market-data upstream for tests.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

pub const DAY_MS: i64 = 86_400_000;
pub const START_MS: i64 = 1_700_000_000_000;

/// Base URL that refuses connections, for failure-path tests.
pub const DEAD_UPSTREAM: &str = "http://127.0.0.1:1";

async fn markets(Query(q): Query<HashMap<String, String>>) -> impl IntoResponse {
    if q.get("vs_currency").map(String::as_str) != Some("usd") {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "vs_currency" })));
    }
    (
        StatusCode::OK,
        Json(json!([
            { "id": "bitcoin", "symbol": "btc", "name": "Bitcoin",
              "current_price": 50000.0, "price_change_percentage_24h": 2.5,
              "image": "https://example.test/btc.png", "market_cap_rank": 1 },
            { "id": "ethereum", "symbol": "eth", "name": "Ethereum",
              "current_price": 3000.0, "price_change_percentage_24h": -1.2,
              "image": "https://example.test/eth.png", "market_cap_rank": 2 },
            { "id": "tether", "symbol": "usdt", "name": "Tether",
              "current_price": 1.0, "price_change_percentage_24h": 0.0,
              "image": "https://example.test/usdt.png", "market_cap_rank": 3 }
        ])),
    )
}

async fn news() -> impl IntoResponse {
    Json(json!({
        "data": [
            { "title": "Bitcoin rallies", "url": "https://example.test/1" }
        ]
    }))
}

async fn coin_list() -> impl IntoResponse {
    Json(json!([
        { "id": "bitcoin", "symbol": "btc", "name": "Bitcoin" },
        { "id": "ethereum", "symbol": "eth", "name": "Ethereum" }
    ]))
}

/// One point per requested day. `bitcoin` rises steadily, `flatcoin` never
/// moves, `emptycoin` has no prices, `ratelimited` answers a plain-text 429;
/// anything else is a 404.
async fn market_chart(
    Path(id): Path<String>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    let days: i64 = q.get("days").and_then(|d| d.parse().ok()).unwrap_or(1);
    let price_at = |i: i64| -> Option<f64> {
        match id.as_str() {
            "bitcoin" => Some(100.0 + i as f64),
            "flatcoin" => Some(10.0),
            _ => None,
        }
    };

    if id == "ratelimited" {
        return (StatusCode::TOO_MANY_REQUESTS, "Too Many Requests").into_response();
    }
    if id == "emptycoin" {
        return Json(json!({ "prices": [] })).into_response();
    }
    if price_at(0).is_none() {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": "coin not found" })))
            .into_response();
    }

    let prices: Vec<_> = (0..days)
        .filter_map(|i| price_at(i).map(|p| json!([START_MS + i * DAY_MS, p])))
        .collect();
    (
        StatusCode::OK,
        Json(json!({ "prices": prices, "market_caps": [], "total_volumes": [] })),
    )
        .into_response()
}

/// Start the fake upstream on an ephemeral port and return its base URL.
pub async fn spawn_fake_upstream() -> String {
    let app = Router::new()
        .route("/coins/markets", get(markets))
        .route("/news", get(news))
        .route("/coins/list", get(coin_list))
        .route("/coins/:id/market_chart", get(market_chart));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake upstream");
    let addr = listener.local_addr().expect("fake upstream addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://{addr}")
}
