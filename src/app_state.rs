// =============================================================================
// Central Application State
// =============================================================================
//
// Shared across all async tasks via `Arc<AppState>`:
//   - Atomic counter for lock-free version tracking.
//   - parking_lot::RwLock for the dashboard snapshot written by the refresh
//     task and read by the REST handlers.
// =============================================================================

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;

use crate::coingecko::{CoinGeckoClient, MarketCoin};
use crate::runtime_config::RuntimeConfig;

// =============================================================================
// Dashboard snapshot
// =============================================================================

/// Last result of the periodic refresh. Each part keeps its previous good
/// value when a refresh of that part fails.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardSnapshot {
    pub top_coins: Vec<MarketCoin>,
    pub news: Value,
    /// Completion time of the last refresh attempt.
    pub refreshed_at: Option<DateTime<Utc>>,
    pub top_coins_error: Option<String>,
    pub news_error: Option<String>,
}

// =============================================================================
// AppState
// =============================================================================

pub struct AppState {
    /// Incremented on every dashboard update.
    pub state_version: AtomicU64,

    pub runtime_config: RuntimeConfig,
    pub client: CoinGeckoClient,
    pub dashboard: RwLock<DashboardSnapshot>,

    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        let client = CoinGeckoClient::new(&config)?;
        Ok(Self {
            state_version: AtomicU64::new(0),
            runtime_config: config,
            client,
            dashboard: RwLock::new(DashboardSnapshot::default()),
            start_time: std::time::Instant::now(),
        })
    }

    pub fn increment_version(&self) -> u64 {
        self.state_version.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn current_state_version(&self) -> u64 {
        self.state_version.load(Ordering::Relaxed)
    }

    pub fn dashboard_snapshot(&self) -> DashboardSnapshot {
        self.dashboard.read().clone()
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
