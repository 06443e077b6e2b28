// =============================================================================
// Shared types used across the Morkan backend
// =============================================================================

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A single sample from the market-chart endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Milliseconds since the UNIX epoch.
    pub timestamp: i64,
    /// Price in the quote currency (USD by default).
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: i64, price: f64) -> Self {
        Self { timestamp, price }
    }

    /// Timestamp as a UTC datetime, `None` when out of chrono's range.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }
}

/// Extract the bare price series (oldest first) from a slice of points.
pub fn prices_of(points: &[PricePoint]) -> Vec<f64> {
    points.iter().map(|p| p.price).collect()
}

/// The fixed set of indicators produced by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorKind {
    #[serde(rename = "RSI")]
    Rsi,
    #[serde(rename = "MACD")]
    Macd,
    #[serde(rename = "Bollinger Bands")]
    BollingerBands,
}

impl IndicatorKind {
    /// Evaluation order used by `analyze`.
    pub const ALL: [IndicatorKind; 3] = [Self::Rsi, Self::Macd, Self::BollingerBands];
}

impl std::fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rsi => write!(f, "RSI"),
            Self::Macd => write!(f, "MACD"),
            Self::BollingerBands => write!(f, "Bollinger Bands"),
        }
    }
}

/// Trading signal attached to an indicator reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Buy,
    Sell,
    Neutral,
}

impl Default for Signal {
    fn default() -> Self {
        Self::Neutral
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// One derived indicator reading. Recomputed on every refresh, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    #[serde(rename = "name")]
    pub kind: IndicatorKind,
    pub value: f64,
    pub signal: Signal,
}

impl Indicator {
    pub fn new(kind: IndicatorKind, value: f64, signal: Signal) -> Self {
        Self {
            kind,
            value,
            signal,
        }
    }
}
