// =============================================================================
// CoinGecko REST API Client
// =============================================================================
//
// Thin wrapper over the public market-data API. Every call returns the
// upstream JSON body; non-2xx statuses become errors carrying the status and
// body so the REST layer can report them.
// =============================================================================

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, instrument};

use super::models::{MarketChart, MarketCoin};
use crate::runtime_config::RuntimeConfig;
use crate::types::PricePoint;

/// Client for the market-data API.
#[derive(Clone)]
pub struct CoinGeckoClient {
    base_url: String,
    vs_currency: String,
    top_limit: u32,
    client: reqwest::Client,
}

impl CoinGeckoClient {
    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    pub fn new(config: &RuntimeConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("morkan-backend/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build reqwest client")?;

        debug!(base_url = %config.upstream_base_url, "CoinGeckoClient initialised");

        Ok(Self {
            base_url: config.upstream_base_url.trim_end_matches('/').to_string(),
            vs_currency: config.vs_currency.clone(),
            top_limit: config.top_limit,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -------------------------------------------------------------------------
    // Request helper
    // -------------------------------------------------------------------------

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);

        let resp = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("GET {path} request failed"))?;

        let status = resp.status();
        if !status.is_success() {
            // Error bodies are often plain text or HTML (rate limits, gateways).
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("upstream GET {} returned {}: {}", path, status, body.trim());
        }

        resp.json()
            .await
            .with_context(|| format!("failed to parse {path} response"))
    }

    // -------------------------------------------------------------------------
    // Endpoints
    // -------------------------------------------------------------------------

    /// GET /coins/markets — top coins by market cap.
    #[instrument(skip(self), name = "coingecko::top_markets")]
    pub async fn top_markets(&self) -> Result<Vec<MarketCoin>> {
        let body = self
            .get_json(
                "/coins/markets",
                &[
                    ("vs_currency", self.vs_currency.clone()),
                    ("order", "market_cap_desc".to_string()),
                    ("per_page", self.top_limit.to_string()),
                    ("page", "1".to_string()),
                    ("sparkline", "false".to_string()),
                ],
            )
            .await?;

        let coins: Vec<MarketCoin> =
            serde_json::from_value(body).context("unexpected /coins/markets payload")?;
        debug!(count = coins.len(), "top markets retrieved");
        Ok(coins)
    }

    /// GET /news — passthrough.
    #[instrument(skip(self), name = "coingecko::news")]
    pub async fn news(&self) -> Result<Value> {
        self.get_json("/news", &[]).await
    }

    /// GET /coins/list — passthrough.
    #[instrument(skip(self), name = "coingecko::coin_list")]
    pub async fn coin_list(&self) -> Result<Value> {
        self.get_json("/coins/list", &[]).await
    }

    /// GET /coins/{id}/market_chart — raw body.
    #[instrument(skip(self), name = "coingecko::market_chart")]
    pub async fn market_chart(&self, id: &str, days: u32) -> Result<Value> {
        self.get_json(
            &format!("/coins/{id}/market_chart"),
            &[
                ("vs_currency", self.vs_currency.clone()),
                ("days", days.to_string()),
            ],
        )
        .await
    }

    /// Market chart parsed into price points, oldest first.
    pub async fn price_history(&self, id: &str, days: u32) -> Result<Vec<PricePoint>> {
        let body = self.market_chart(id, days).await?;
        let chart: MarketChart =
            serde_json::from_value(body).context("unexpected market_chart payload")?;
        let points = chart.into_points();
        debug!(id, days, points = points.len(), "price history retrieved");
        Ok(points)
    }
}
