//! Indicator error types.

use thiserror::Error;

use crate::types::IndicatorKind;

/// Errors produced by the indicator calculations.
///
/// Both variants are local to one computation; callers render an
/// "unavailable" state for the affected indicator and carry on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("insufficient history for {indicator}: required {required}, got {got}")]
    InsufficientHistory {
        indicator: IndicatorKind,
        required: usize,
        got: usize,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for indicator operations.
pub type Result<T> = std::result::Result<T, IndicatorError>;

/// Reject empty or non-finite price sequences before any arithmetic runs.
pub fn validate_prices(prices: &[f64]) -> Result<()> {
    if prices.is_empty() {
        return Err(IndicatorError::InvalidInput("empty price sequence".into()));
    }
    if let Some(idx) = prices.iter().position(|p| !p.is_finite()) {
        return Err(IndicatorError::InvalidInput(format!(
            "non-finite price {} at index {idx}",
            prices[idx]
        )));
    }
    Ok(())
}

/// Validate and check that at least `required` points are present.
pub(crate) fn require_history(
    prices: &[f64],
    indicator: IndicatorKind,
    required: usize,
) -> Result<()> {
    validate_prices(prices)?;
    if prices.len() < required {
        return Err(IndicatorError::InsufficientHistory {
            indicator,
            required,
            got: prices.len(),
        });
    }
    Ok(())
}
