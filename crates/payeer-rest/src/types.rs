//! Types for Payeer Trade API requests and responses
//!
//! Response envelopes are dynamic JSON objects; request parameters for the
//! order endpoints are typed and serialize into the same object shape the
//! pipeline signs and transmits.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{RestError, RestResult};

/// Default trading pair for market data endpoints
pub const DEFAULT_PAIR: &str = "BTC_USDT";

/// A JSON object: request parameters or a decoded response envelope
pub type Params = Map<String, Value>;

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderAction {
    Buy,
    Sell,
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Limit,
    Market,
    StopLimit,
}

/// Parameters for `order_create`
///
/// Amounts serialize as strings, preserving decimal precision on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    /// Trading pair (e.g., "BTC_USDT")
    pub pair: String,
    /// Order type
    #[serde(rename = "type")]
    pub kind: OrderType,
    /// Buy or sell
    pub action: OrderAction,
    /// Amount in base currency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// Limit price (limit and stop-limit orders)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Amount in quote currency (market orders)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,
    /// Trigger price (stop-limit orders)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<Decimal>,
}

impl OrderRequest {
    /// Limit order for `amount` of base currency at `price`
    pub fn limit(pair: impl Into<String>, action: OrderAction, amount: Decimal, price: Decimal) -> Self {
        Self {
            pair: pair.into(),
            kind: OrderType::Limit,
            action,
            amount: Some(amount),
            price: Some(price),
            value: None,
            stop_price: None,
        }
    }

    /// Market order for `amount` of base currency
    pub fn market(pair: impl Into<String>, action: OrderAction, amount: Decimal) -> Self {
        Self {
            pair: pair.into(),
            kind: OrderType::Market,
            action,
            amount: Some(amount),
            price: None,
            value: None,
            stop_price: None,
        }
    }
}

/// Filter for `orders_cancel` and `my_orders`
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<OrderAction>,
}

/// Filter for `my_trades`
#[derive(Debug, Clone, Default, Serialize)]
pub struct TradeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<OrderAction>,
    /// Start of the period, Unix milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<u64>,
    /// End of the period, Unix milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<u64>,
    /// Continue listing after this trade id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub append: Option<u64>,
    /// Maximum number of items to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Serialize typed request parameters into the pipeline's object shape
pub(crate) fn to_params<T: Serialize>(value: &T) -> RestResult<Params> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(RestError::Parse(
            "request parameters must serialize to a JSON object".to_string(),
        )),
        Err(e) => Err(RestError::Parse(e.to_string())),
    }
}
