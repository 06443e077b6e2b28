// =============================================================================
// Morkan — market-data proxy and technical indicator engine
// =============================================================================

pub mod api;
pub mod app_state;
pub mod coingecko;
pub mod indicators;
pub mod refresh;
pub mod runtime_config;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;
