// =============================================================================
// Runtime Configuration — JSON file with serde defaults plus env overrides
// =============================================================================
//
// All fields carry `#[serde(default)]` so that adding new fields never breaks
// loading an older config file. Environment variables are applied on top of
// whatever was loaded (or the defaults when no file exists).
// =============================================================================

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const DEFAULT_CONFIG_PATH: &str = "morkan_config.json";

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_upstream_base_url() -> String {
    "https://api.coingecko.com/api/v3".to_string()
}

fn default_vs_currency() -> String {
    "usd".to_string()
}

fn default_top_limit() -> u32 {
    10
}

fn default_chart_days() -> u32 {
    7
}

fn default_indicator_days() -> u32 {
    30
}

fn default_static_dir() -> String {
    "public".to_string()
}

fn default_refresh_interval_secs() -> u64 {
    300
}

fn default_request_timeout_secs() -> u64 {
    10
}

// =============================================================================
// RuntimeConfig
// =============================================================================

/// Top-level configuration for the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Base URL of the market-data API, without a trailing slash.
    #[serde(default = "default_upstream_base_url")]
    pub upstream_base_url: String,

    /// Quote currency for prices.
    #[serde(default = "default_vs_currency")]
    pub vs_currency: String,

    /// Number of coins returned by the top list.
    #[serde(default = "default_top_limit")]
    pub top_limit: u32,

    /// Day range for `/api/chart/:id` when the request does not give one.
    #[serde(default = "default_chart_days")]
    pub chart_days: u32,

    /// Day range used to compute indicators.
    #[serde(default = "default_indicator_days")]
    pub indicator_days: u32,

    /// Directory served for every non-API path.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// Period of the dashboard refresh task.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Timeout for each upstream request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            upstream_base_url: default_upstream_base_url(),
            vs_currency: default_vs_currency(),
            top_limit: default_top_limit(),
            chart_days: default_chart_days(),
            indicator_days: default_indicator_days(),
            static_dir: default_static_dir(),
            refresh_interval_secs: default_refresh_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read runtime config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse runtime config from {}", path.display()))?;

        info!(
            path = %path.display(),
            upstream = %config.upstream_base_url,
            "runtime config loaded"
        );

        Ok(config)
    }

    /// Apply environment overrides through `lookup` (normally `std::env::var`).
    ///
    /// - `MORKAN_BIND_ADDR` replaces the whole bind address.
    /// - `PORT` replaces only the port, keeping the host.
    /// - `MORKAN_UPSTREAM_URL`, `MORKAN_STATIC_DIR` replace their fields.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("MORKAN_BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Some(port) = lookup("PORT").filter(|p| p.parse::<u16>().is_ok()) {
            let host = self
                .bind_addr
                .rsplit_once(':')
                .map(|(h, _)| h.to_string())
                .unwrap_or_else(|| "0.0.0.0".to_string());
            self.bind_addr = format!("{host}:{port}");
        }
        if let Some(url) = lookup("MORKAN_UPSTREAM_URL") {
            self.upstream_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(dir) = lookup("MORKAN_STATIC_DIR") {
            self.static_dir = dir;
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn default_config_has_expected_values() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.bind_addr, "0.0.0.0:3000");
        assert_eq!(cfg.upstream_base_url, "https://api.coingecko.com/api/v3");
        assert_eq!(cfg.vs_currency, "usd");
        assert_eq!(cfg.top_limit, 10);
        assert_eq!(cfg.chart_days, 7);
        assert_eq!(cfg.indicator_days, 30);
        assert_eq!(cfg.refresh_interval(), Duration::from_secs(300));
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: RuntimeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, RuntimeConfig::default());
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "top_limit": 25, "static_dir": "web" }"#;
        let cfg: RuntimeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.top_limit, 25);
        assert_eq!(cfg.static_dir, "web");
        assert_eq!(cfg.chart_days, 7);
    }

    #[test]
    fn load_missing_file_errors() {
        assert!(RuntimeConfig::load("/nonexistent/morkan_config.json").is_err());
    }

    #[test]
    fn load_from_disk() {
        let path = std::env::temp_dir().join(format!("morkan_cfg_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "chart_days": 14 }"#).unwrap();
        let cfg = RuntimeConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(cfg.chart_days, 14);
    }

    #[test]
    fn port_override_keeps_host() {
        let mut cfg = RuntimeConfig::default();
        cfg.bind_addr = "127.0.0.1:3000".into();
        cfg.apply_env(env(&[("PORT", "8080")]));
        assert_eq!(cfg.bind_addr, "127.0.0.1:8080");
    }

    #[test]
    fn invalid_port_is_ignored() {
        let mut cfg = RuntimeConfig::default();
        cfg.apply_env(env(&[("PORT", "http")]));
        assert_eq!(cfg.bind_addr, "0.0.0.0:3000");
    }

    #[test]
    fn upstream_override_strips_trailing_slash() {
        let mut cfg = RuntimeConfig::default();
        cfg.apply_env(env(&[
            ("MORKAN_UPSTREAM_URL", "http://localhost:9000/api/"),
            ("MORKAN_STATIC_DIR", "/srv/www"),
        ]));
        assert_eq!(cfg.upstream_base_url, "http://localhost:9000/api");
        assert_eq!(cfg.static_dir, "/srv/www");
    }
}
