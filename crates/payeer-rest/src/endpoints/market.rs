//! Public market data endpoints
//!
//! Usable without credentials; when credentials are configured the shared
//! pipeline signs these requests too.

use crate::client::PayeerClient;
use crate::error::RestResult;
use crate::types::Params;
use serde_json::Value;
use tracing::instrument;

/// Market data endpoints
pub struct MarketEndpoints<'a> {
    client: &'a PayeerClient,
}

impl<'a> MarketEndpoints<'a> {
    pub(crate) fn new(client: &'a PayeerClient) -> Self {
        Self { client }
    }

    /// Get exchange info: available pairs and their limits
    ///
    /// # Arguments
    /// * `pair` - Optional trading pair to restrict the listing
    ///
    /// # Returns
    /// The whole envelope; pair limits live under its `pairs` field
    #[instrument(skip(self))]
    pub async fn get_info(&self, pair: Option<&str>) -> RestResult<Params> {
        let mut params = Params::new();
        if let Some(pair) = pair {
            params.insert("pair".to_string(), Value::from(pair));
        }
        self.client.call("info", params).await
    }

    /// Get 24h ticker statistics for a trading pair
    ///
    /// # Arguments
    /// * `pair` - Trading pair (e.g., "BTC_USDT")
    #[instrument(skip(self))]
    pub async fn get_ticker(&self, pair: &str) -> RestResult<Value> {
        self.client
            .call_field("ticker", pair_params(pair), "pairs")
            .await
    }

    /// Get the order book for a trading pair
    #[instrument(skip(self))]
    pub async fn get_orders(&self, pair: &str) -> RestResult<Value> {
        self.client
            .call_field("orders", pair_params(pair), "pairs")
            .await
    }

    /// Get recent public trades for a trading pair
    #[instrument(skip(self))]
    pub async fn get_trades(&self, pair: &str) -> RestResult<Value> {
        self.client
            .call_field("trades", pair_params(pair), "pairs")
            .await
    }
}

fn pair_params(pair: &str) -> Params {
    let mut params = Params::new();
    params.insert("pair".to_string(), Value::from(pair));
    params
}
