//! Trading endpoints for order management
//!
//! These endpoints are rejected by the server unless the client was built
//! with credentials.

use crate::client::PayeerClient;
use crate::error::RestResult;
use crate::types::{to_params, OrderFilter, OrderRequest, Params};
use serde_json::Value;
use tracing::{debug, instrument};

/// Trading endpoints for order management
pub struct TradingEndpoints<'a> {
    client: &'a PayeerClient,
}

impl<'a> TradingEndpoints<'a> {
    pub(crate) fn new(client: &'a PayeerClient) -> Self {
        Self { client }
    }

    /// Place a new order
    ///
    /// # Arguments
    /// * `order` - Order parameters; see [`OrderRequest::limit`] and
    ///   [`OrderRequest::market`] for the common shapes
    ///
    /// # Returns
    /// The whole envelope, including `order_id` and execution details
    #[instrument(skip(self, order), fields(pair = %order.pair, action = ?order.action, kind = ?order.kind))]
    pub async fn create_order(&self, order: &OrderRequest) -> RestResult<Params> {
        debug!(
            "placing {:?} {:?} order for {}",
            order.action, order.kind, order.pair
        );
        self.client.call("order_create", to_params(order)?).await
    }

    /// Get the status of an order by id
    #[instrument(skip(self))]
    pub async fn get_order_status(&self, order_id: u64) -> RestResult<Value> {
        self.client
            .call_field("order_status", order_params(order_id), "order")
            .await
    }

    /// Cancel an order by id
    ///
    /// # Returns
    /// The whole envelope; `success: true` confirms the cancellation
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: u64) -> RestResult<Params> {
        self.client
            .call("order_cancel", order_params(order_id))
            .await
    }

    /// Cancel all own orders matching a filter
    ///
    /// An empty filter cancels every open order.
    ///
    /// # Returns
    /// The `items` list of cancelled order ids with per-order outcomes
    #[instrument(skip(self, filter))]
    pub async fn cancel_orders(&self, filter: &OrderFilter) -> RestResult<Value> {
        self.client
            .call_field("orders_cancel", to_params(filter)?, "items")
            .await
    }
}

fn order_params(order_id: u64) -> Params {
    let mut params = Params::new();
    params.insert("order_id".to_string(), order_id.into());
    params
}
