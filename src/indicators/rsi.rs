// =============================================================================
// Relative Strength Index (RSI)
// =============================================================================
//
// Step 1 — Compute price changes (deltas) from consecutive prices.
// Step 2 — Split into gains (positive deltas) and losses (magnitude of
//          negative deltas).
// Step 3 — Average the first `RSI_PERIOD` gains and losses (the oldest part of
//          the window). With exactly 14 prices only 13 deltas exist; all of
//          them are used.
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// Degenerate averages: avg_loss == 0 with gains => 100, no movement => 0.
// Thresholds:  RSI > 70 => sell,  RSI < 30 => buy.
// =============================================================================

use tracing::debug;

use super::error::{require_history, IndicatorError, Result};
use crate::types::{IndicatorKind, Signal};

/// Number of deltas averaged, and the minimum number of prices required.
pub const RSI_PERIOD: usize = 14;

pub const OVERBOUGHT: f64 = 70.0;
pub const OVERSOLD: f64 = 30.0;

/// Checked RSI over `prices` (oldest first).
///
/// # Errors
/// - `InvalidInput` for an empty or non-finite sequence.
/// - `InsufficientHistory` for fewer than `RSI_PERIOD` prices.
pub fn calculate_rsi(prices: &[f64]) -> Result<f64> {
    require_history(prices, IndicatorKind::Rsi, RSI_PERIOD)?;

    let (sum_gain, sum_loss, count) = prices
        .windows(2)
        .map(|w| w[1] - w[0])
        .take(RSI_PERIOD)
        .fold((0.0_f64, 0.0_f64, 0usize), |(g, l, n), d| {
            if d > 0.0 {
                (g + d, l, n + 1)
            } else {
                (g, l - d, n + 1)
            }
        });

    let avg_gain = sum_gain / count as f64;
    let avg_loss = sum_loss / count as f64;
    if !avg_gain.is_finite() || !avg_loss.is_finite() {
        return Err(IndicatorError::InvalidInput(
            "RSI averages overflowed to a non-finite value".into(),
        ));
    }

    let rsi = rsi_from_averages(avg_gain, avg_loss);
    if rsi.is_finite() {
        Ok(rsi)
    } else {
        Err(IndicatorError::InvalidInput(format!("RSI is not finite: {rsi}")))
    }
}

/// Sentinel form: `0.0` whenever the checked form fails.
///
/// A zero from this function is not a reading; prefer `calculate_rsi` when the
/// caller can render an unavailable state.
pub fn compute_rsi(prices: &[f64]) -> f64 {
    calculate_rsi(prices).unwrap_or(0.0)
}

pub fn rsi_signal(rsi: f64) -> Signal {
    if rsi > OVERBOUGHT {
        Signal::Sell
    } else if rsi < OVERSOLD {
        Signal::Buy
    } else {
        Signal::Neutral
    }
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        let rsi = if avg_gain > 0.0 { 100.0 } else { 0.0 };
        debug!(avg_gain, rsi, "degenerate RSI averages");
        return rsi;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}
