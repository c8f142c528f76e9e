//! Account endpoints: balances, own orders, own trade history
//!
//! These endpoints are rejected by the server unless the client was built
//! with credentials.

use crate::client::PayeerClient;
use crate::error::RestResult;
use crate::types::{to_params, OrderFilter, Params, TradeFilter};
use serde_json::Value;
use tracing::instrument;

/// Account endpoints
pub struct AccountEndpoints<'a> {
    client: &'a PayeerClient,
}

impl<'a> AccountEndpoints<'a> {
    pub(crate) fn new(client: &'a PayeerClient) -> Self {
        Self { client }
    }

    /// Get balances for all account currencies
    #[instrument(skip(self))]
    pub async fn get_account(&self) -> RestResult<Value> {
        self.client
            .call_field("account", Params::new(), "balances")
            .await
    }

    /// Get own open orders matching a filter
    #[instrument(skip(self, filter))]
    pub async fn get_my_orders(&self, filter: &OrderFilter) -> RestResult<Value> {
        self.client
            .call_field("my_orders", to_params(filter)?, "items")
            .await
    }

    /// Get own trade history matching a filter
    #[instrument(skip(self, filter))]
    pub async fn get_my_trades(&self, filter: &TradeFilter) -> RestResult<Value> {
        self.client
            .call_field("my_trades", to_params(filter)?, "items")
            .await
    }
}
