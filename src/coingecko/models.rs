use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::PricePoint;

/// One row of `/coins/markets`.
///
/// Only the fields the backend reads are typed; everything else the upstream
/// sends is kept in `extra` and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketCoin {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MarketCoin {
    /// Case-insensitive substring match on name or symbol.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        !q.is_empty()
            && (self.name.to_lowercase().contains(&q) || self.symbol.to_lowercase().contains(&q))
    }
}

/// Coins from `coins` matching `query`, in their original order.
pub fn search_coins<'a>(coins: &'a [MarketCoin], query: &str) -> Vec<&'a MarketCoin> {
    coins.iter().filter(|c| c.matches(query)).collect()
}

/// Body of `/coins/{id}/market_chart`. Each series is `[timestamp_ms, value]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketChart {
    #[serde(default)]
    pub prices: Vec<(f64, f64)>,
}

impl MarketChart {
    /// Price samples as `PricePoint`s, oldest first.
    pub fn into_points(self) -> Vec<PricePoint> {
        let mut points: Vec<PricePoint> = self
            .prices
            .into_iter()
            .map(|(ts, price)| PricePoint::new(ts as i64, price))
            .collect();
        points.sort_by_key(|p| p.timestamp);
        points
    }
}
