// =============================================================================
// Dashboard refresh — fixed-interval polling of the top list and news
// =============================================================================
//
// Both requests go out concurrently and the snapshot is written once both
// have finished. There is no backoff: a failed part is logged, its error is
// recorded, and the previous data stays in place until the next tick.
// =============================================================================

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::app_state::AppState;

/// Run one refresh and publish the result.
pub async fn refresh_once(state: &AppState) {
    let (top, news) = tokio::join!(state.client.top_markets(), state.client.news());

    let mut snap = state.dashboard.write();
    match top {
        Ok(coins) => {
            snap.top_coins = coins;
            snap.top_coins_error = None;
        }
        Err(e) => {
            warn!(error = %e, "top list refresh failed");
            snap.top_coins_error = Some(format!("{e:#}"));
        }
    }
    match news {
        Ok(body) => {
            snap.news = body;
            snap.news_error = None;
        }
        Err(e) => {
            warn!(error = %e, "news refresh failed");
            snap.news_error = Some(format!("{e:#}"));
        }
    }
    snap.refreshed_at = Some(chrono::Utc::now());
    let coins = snap.top_coins.len();
    drop(snap);

    let version = state.increment_version();
    info!(coins, version, "dashboard refreshed");
}

/// Refresh immediately, then on every tick of the configured interval.
pub async fn run_refresh_loop(state: Arc<AppState>) {
    let period = state.runtime_config.refresh_interval();
    info!(period_secs = period.as_secs(), "dashboard refresh loop starting");

    let mut interval = refresh_interval(period);
    loop {
        interval.tick().await;
        refresh_once(&state).await;
    }
}

/// Ticker for the refresh loop. A refresh that overruns the period pushes
/// the next tick back rather than firing a catch-up burst.
fn refresh_interval(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime_config::RuntimeConfig;
    use crate::testing::{spawn_fake_upstream, DEAD_UPSTREAM};

    fn state_for(base: &str) -> AppState {
        AppState::new(RuntimeConfig {
            upstream_base_url: base.to_string(),
            request_timeout_secs: 2,
            ..RuntimeConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn refresh_populates_snapshot() {
        let state = state_for(&spawn_fake_upstream().await);
        refresh_once(&state).await;

        let snap = state.dashboard_snapshot();
        assert_eq!(snap.top_coins.len(), 3);
        assert!(snap.news["data"].is_array());
        assert!(snap.refreshed_at.is_some());
        assert!(snap.top_coins_error.is_none());
        assert_eq!(state.current_state_version(), 1);
    }

    #[tokio::test]
    async fn slow_refreshes_delay_the_next_tick() {
        let interval = refresh_interval(Duration::from_secs(300));
        assert_eq!(interval.missed_tick_behavior(), MissedTickBehavior::Delay);
        assert_eq!(interval.period(), Duration::from_secs(300));
    }

    #[tokio::test]
    async fn failure_keeps_previous_data() {
        let state = state_for(DEAD_UPSTREAM);
        {
            let mut snap = state.dashboard.write();
            snap.news = serde_json::json!({ "data": ["cached"] });
        }
        refresh_once(&state).await;

        let snap = state.dashboard_snapshot();
        assert_eq!(snap.news["data"][0], "cached");
        assert!(snap.top_coins_error.is_some());
        assert!(snap.news_error.is_some());
        assert!(snap.refreshed_at.is_some());
    }
}
