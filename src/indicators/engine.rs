// =============================================================================
// Indicator engine — RSI, MACD, Bollinger Bands in a fixed order
// =============================================================================
//
// Every consumer (REST endpoint, dashboard) goes through `analyze` or
// `analyze_detailed`; no call site computes an indicator on its own.

use serde::Serialize;

use super::bollinger::calculate_bollinger;
use super::error::{validate_prices, IndicatorError};
use super::macd::calculate_macd;
use super::rsi::{calculate_rsi, rsi_signal};
use crate::types::{Indicator, IndicatorKind};

/// Outcome of a single indicator: a reading, or the reason it is unavailable.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorOutcome {
    pub kind: IndicatorKind,
    pub result: Result<Indicator, IndicatorError>,
}

/// Display entry for an indicator that could not be computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unavailable {
    pub name: IndicatorKind,
    pub reason: String,
}

impl IndicatorOutcome {
    pub fn unavailable(&self) -> Option<Unavailable> {
        self.result.as_ref().err().map(|e| Unavailable {
            name: self.kind,
            reason: e.to_string(),
        })
    }
}

fn compute(kind: IndicatorKind, prices: &[f64]) -> Result<Indicator, IndicatorError> {
    match kind {
        IndicatorKind::Rsi => {
            let rsi = calculate_rsi(prices)?;
            Ok(Indicator::new(kind, rsi, rsi_signal(rsi)))
        }
        IndicatorKind::Macd => {
            let m = calculate_macd(prices)?;
            Ok(Indicator::new(kind, m.macd, m.trading_signal()))
        }
        IndicatorKind::BollingerBands => {
            let bb = calculate_bollinger(prices)?;
            Ok(Indicator::new(kind, bb.current, bb.trading_signal()))
        }
    }
}

/// One outcome per indicator, in `IndicatorKind::ALL` order.
///
/// Invalid input (empty or non-finite) marks all three unavailable with the
/// same reason.
pub fn analyze_detailed(prices: &[f64]) -> Vec<IndicatorOutcome> {
    let invalid = validate_prices(prices).err();
    IndicatorKind::ALL
        .iter()
        .map(|&kind| IndicatorOutcome {
            kind,
            result: match &invalid {
                Some(e) => Err(e.clone()),
                None => compute(kind, prices),
            },
        })
        .collect()
}

/// Available indicators only, in fixed order. Indicators lacking history are
/// omitted rather than reported as zero.
pub fn analyze(prices: &[f64]) -> Vec<Indicator> {
    analyze_detailed(prices)
        .into_iter()
        .filter_map(|o| o.result.ok())
        .collect()
}
