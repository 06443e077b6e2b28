// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators shown on the coin
// detail view. Every checked function returns `Result<T, IndicatorError>` so
// callers are forced to handle insufficient-history and invalid-input cases
// instead of rendering a misleading zero.

pub mod bollinger;
pub mod ema;
pub mod engine;
pub mod error;
pub mod macd;
pub mod rsi;

pub use bollinger::{calculate_bollinger, BollingerBands};
pub use engine::{analyze, analyze_detailed, IndicatorOutcome, Unavailable};
pub use error::{validate_prices, IndicatorError};
pub use macd::{calculate_macd, MacdResult};
pub use rsi::{calculate_rsi, compute_rsi};
