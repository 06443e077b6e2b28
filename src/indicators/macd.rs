// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
// MACD line  = SMA(12) - SMA(26) over the trailing prices. Simple averages are
//              used for the two legs.
// Signal     = 9-period EMA of the MACD line series. The series has one value
//              per price index starting at index 25, so 26 prices give a single
//              MACD point and the signal equals it; every further price adds a
//              point and the signal starts to lag.
// Histogram  = MACD - signal.
//
// Signal policy: MACD above signal => buy, below => sell, equal => neutral.
// =============================================================================

use serde::Serialize;

use super::ema::{calculate_ema, sma};
use super::error::{require_history, IndicatorError, Result};
use crate::types::{IndicatorKind, Signal};

pub const FAST_PERIOD: usize = 12;
pub const SLOW_PERIOD: usize = 26;
pub const SIGNAL_PERIOD: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacdResult {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

impl MacdResult {
    pub fn trading_signal(&self) -> Signal {
        if self.macd > self.signal {
            Signal::Buy
        } else if self.macd < self.signal {
            Signal::Sell
        } else {
            Signal::Neutral
        }
    }
}

/// MACD line value for every price index from `SLOW_PERIOD - 1` onwards.
fn macd_line_series(prices: &[f64]) -> Vec<f64> {
    (SLOW_PERIOD..=prices.len())
        .filter_map(|end| {
            let window = &prices[..end];
            Some(sma(window, FAST_PERIOD)? - sma(window, SLOW_PERIOD)?)
        })
        .collect()
}

/// Compute MACD, signal line and histogram for `prices` (oldest first).
///
/// # Errors
/// - `InvalidInput` for an empty or non-finite sequence.
/// - `InsufficientHistory` for fewer than `SLOW_PERIOD` prices.
pub fn calculate_macd(prices: &[f64]) -> Result<MacdResult> {
    require_history(prices, IndicatorKind::Macd, SLOW_PERIOD)?;

    let line = macd_line_series(prices);
    let signal_line = calculate_ema(&line, SIGNAL_PERIOD);

    match (line.last(), signal_line.last()) {
        (Some(&macd), Some(&signal)) if signal_line.len() == line.len() => Ok(MacdResult {
            macd,
            signal,
            histogram: macd - signal,
        }),
        _ => Err(IndicatorError::InvalidInput(
            "MACD series overflowed to a non-finite value".into(),
        )),
    }
}
