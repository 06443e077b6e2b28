// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ), with σ the population standard deviation over
// the same 20-price window and k = 2.
//
// Signal policy: last price above the upper band => sell, below the lower
// band => buy, otherwise neutral.

use serde::Serialize;

use super::error::{require_history, IndicatorError, Result};
use crate::types::{IndicatorKind, Signal};

pub const BOLLINGER_PERIOD: usize = 20;
pub const NUM_STD: f64 = 2.0;

/// Result of a Bollinger Band calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    /// Most recent price, compared against the bands.
    pub current: f64,
}

impl BollingerBands {
    pub fn trading_signal(&self) -> Signal {
        if self.current > self.upper {
            Signal::Sell
        } else if self.current < self.lower {
            Signal::Buy
        } else {
            Signal::Neutral
        }
    }
}

/// Calculate Bollinger Bands over the last `BOLLINGER_PERIOD` prices.
///
/// # Errors
/// - `InvalidInput` for an empty or non-finite sequence.
/// - `InsufficientHistory` for fewer than `BOLLINGER_PERIOD` prices.
pub fn calculate_bollinger(prices: &[f64]) -> Result<BollingerBands> {
    require_history(prices, IndicatorKind::BollingerBands, BOLLINGER_PERIOD)?;

    let window = &prices[prices.len() - BOLLINGER_PERIOD..];
    let n = BOLLINGER_PERIOD as f64;

    // Moments are taken around the first price of the window: a constant
    // window has all-zero offsets, so the bands collapse exactly onto it.
    let pivot = window[0];
    let offsets: Vec<f64> = window.iter().map(|x| x - pivot).collect();
    let mean_offset = offsets.iter().sum::<f64>() / n;
    let variance = offsets
        .iter()
        .map(|d| (d - mean_offset).powi(2))
        .sum::<f64>()
        / n;
    let std_dev = variance.sqrt();
    let middle = pivot + mean_offset;

    let bands = BollingerBands {
        upper: middle + NUM_STD * std_dev,
        middle,
        lower: middle - NUM_STD * std_dev,
        current: window[BOLLINGER_PERIOD - 1],
    };

    if [bands.upper, bands.middle, bands.lower]
        .iter()
        .all(|v| v.is_finite())
    {
        Ok(bands)
    } else {
        Err(IndicatorError::InvalidInput(
            "Bollinger Bands overflowed to a non-finite value".into(),
        ))
    }
}
