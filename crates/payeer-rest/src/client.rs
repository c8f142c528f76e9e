//! Main REST client implementation
//!
//! Every endpoint funnels through [`PayeerClient::call`]: one pipeline that
//! signs when credentials are configured, picks the HTTP verb from the body,
//! dispatches through the transport, and unwraps the `success` envelope.

use crate::endpoints::{AccountEndpoints, MarketEndpoints, TradingEndpoints};
use crate::error::{RestError, RestResult};
use crate::transport::{HttpMethod, HttpRequest, HttpTransport, ReqwestTransport};
use crate::types::{OrderFilter, OrderRequest, Params, TradeFilter};
use parking_lot::Mutex;
use payeer_auth::Credentials;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Base URL of the trade API; the method name is appended as a path segment
const BASE_URL: &str = "https://payeer.com/api/trade/";

/// Payeer Trade REST API client
///
/// Holds optional credentials and an injected transport. Whenever
/// credentials are present, every request is signed; this is a property of
/// the pipeline, not of individual endpoints.
///
/// # Example
///
/// ```no_run
/// use payeer_rest::{Credentials, PayeerClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Market data only
///     let client = PayeerClient::new();
///     let ticker = client.get_ticker("BTC_USDT").await?;
///
///     // With authentication for account and trading endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = PayeerClient::with_credentials(creds);
///     let balances = auth_client.get_account().await?;
///
///     Ok(())
/// }
/// ```
pub struct PayeerClient {
    transport: Arc<dyn HttpTransport>,
    credentials: Option<Credentials>,
    base_url: String,
    /// Last API error object, overwritten on each failed call.
    /// Last-write-wins diagnostic state, not a correctness-critical value.
    last_error: Mutex<Params>,
}

impl PayeerClient {
    /// Create a new client without authentication
    ///
    /// Only public market data will be usable.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    ///
    /// Every request will be signed, including market data requests.
    pub fn with_credentials(credentials: Credentials) -> Self {
        let mut config = ClientConfig::default();
        config.credentials = Some(credentials);
        Self::with_config(config)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Self {
        let transport = Arc::new(ReqwestTransport::new(&config));

        info!("Created Payeer REST client");

        Self {
            transport,
            credentials: config.credentials,
            base_url: BASE_URL.to_string(),
            last_error: Mutex::new(Params::new()),
        }
    }

    /// Create a client over a custom transport
    ///
    /// The transport is the test seam; production code normally uses
    /// [`PayeerClient::with_config`].
    pub fn with_transport(
        transport: Arc<dyn HttpTransport>,
        credentials: Option<Credentials>,
    ) -> Self {
        Self {
            transport,
            credentials,
            base_url: BASE_URL.to_string(),
            last_error: Mutex::new(Params::new()),
        }
    }

    /// Check if the client signs its requests
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Last API error object captured by a failed call
    ///
    /// Empty if no call has failed since construction.
    pub fn last_error(&self) -> Params {
        self.last_error.lock().clone()
    }

    /// Issue a request to `method` and return the decoded envelope
    ///
    /// The pipeline:
    /// 1. With credentials: inject `ts` (Unix milliseconds), serialize the
    ///    parameters once, sign `method + body`, set `API-ID`/`API-SIGN`.
    /// 2. Without credentials but with parameters: serialize, no signature.
    /// 3. Otherwise: no body.
    /// POST whenever a body exists, GET otherwise. An empty response body
    /// decodes to an empty envelope; an envelope with `success != true`
    /// fails with [`RestError::Api`] and is mirrored into the last-error
    /// slot.
    pub async fn call(&self, method: &str, mut params: Params) -> RestResult<Params> {
        let mut headers: Vec<(&'static str, String)> =
            vec![("Content-Type", "application/json".to_string())];

        let body = if let Some(creds) = &self.credentials {
            params.insert("ts".to_string(), Value::from(Credentials::unix_millis()));
            let body = serde_json::to_string(&params).map_err(|e| RestError::Parse(e.to_string()))?;
            // Sign the exact serialization that goes on the wire
            let signature = creds.sign(method, &body);
            headers.push(("API-ID", creds.api_id().to_string()));
            headers.push(("API-SIGN", signature));
            Some(body)
        } else if !params.is_empty() {
            Some(serde_json::to_string(&params).map_err(|e| RestError::Parse(e.to_string()))?)
        } else {
            None
        };

        let http_method = if body.is_some() {
            HttpMethod::Post
        } else {
            HttpMethod::Get
        };

        debug!(
            method,
            verb = ?http_method,
            authenticated = self.credentials.is_some(),
            "dispatching trade API request"
        );

        let request = HttpRequest {
            method: http_method,
            url: format!("{}{}", self.base_url, method),
            headers,
            body,
        };

        let raw = self.transport.send(request).await?;
        self.unwrap_envelope(method, &raw)
    }

    /// Decode the raw response body and enforce the `success` envelope
    fn unwrap_envelope(&self, method: &str, raw: &str) -> RestResult<Params> {
        if raw.trim().is_empty() {
            return Ok(Params::new());
        }

        let value: Value =
            serde_json::from_str(raw).map_err(|e| RestError::Parse(e.to_string()))?;

        let envelope = match value {
            Value::Object(map) => map,
            Value::Null => return Ok(Params::new()),
            _ => {
                return Err(RestError::Parse(
                    "expected a JSON object at the top level".to_string(),
                ))
            }
        };

        if envelope.is_empty() {
            return Ok(envelope);
        }

        // The server sets `success: true` on every good response; anything
        // else (false, null, absent) is an error envelope.
        if envelope.get("success") != Some(&Value::Bool(true)) {
            let details = match envelope.get("error") {
                Some(Value::Object(map)) => map.clone(),
                _ => Params::new(),
            };
            let code = details
                .get("code")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();

            warn!(method, code, "trade API returned an error envelope");

            *self.last_error.lock() = details.clone();
            return Err(RestError::Api { code, details });
        }

        Ok(envelope)
    }

    /// Issue a request and unwrap one payload field from the envelope
    ///
    /// A field missing from a successful envelope yields `Value::Null`
    /// rather than an error; callers must tolerate it.
    pub async fn call_field(&self, method: &str, params: Params, field: &str) -> RestResult<Value> {
        let mut envelope = self.call(method, params).await?;
        Ok(envelope.remove(field).unwrap_or(Value::Null))
    }

    // ========================================================================
    // Market Data Endpoints
    // ========================================================================

    /// Get market data endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self)
    }

    /// Get exchange info and pair limits
    ///
    /// # Arguments
    /// * `pair` - Optional trading pair to restrict the listing
    pub async fn get_info(&self, pair: Option<&str>) -> RestResult<Params> {
        self.market().get_info(pair).await
    }

    /// Get ticker statistics for a trading pair
    ///
    /// # Arguments
    /// * `pair` - Trading pair (e.g., [`crate::DEFAULT_PAIR`])
    pub async fn get_ticker(&self, pair: &str) -> RestResult<Value> {
        self.market().get_ticker(pair).await
    }

    /// Get the order book for a trading pair
    pub async fn get_orders(&self, pair: &str) -> RestResult<Value> {
        self.market().get_orders(pair).await
    }

    /// Get recent public trades for a trading pair
    pub async fn get_trades(&self, pair: &str) -> RestResult<Value> {
        self.market().get_trades(pair).await
    }

    // ========================================================================
    // Account Endpoints
    // ========================================================================

    /// Get account endpoints
    pub fn account(&self) -> AccountEndpoints<'_> {
        AccountEndpoints::new(self)
    }

    /// Get account balances
    pub async fn get_account(&self) -> RestResult<Value> {
        self.account().get_account().await
    }

    /// Get own open orders
    pub async fn get_my_orders(&self, filter: &OrderFilter) -> RestResult<Value> {
        self.account().get_my_orders(filter).await
    }

    /// Get own trade history
    pub async fn get_my_trades(&self, filter: &TradeFilter) -> RestResult<Value> {
        self.account().get_my_trades(filter).await
    }

    // ========================================================================
    // Trading Endpoints
    // ========================================================================

    /// Get trading endpoints
    pub fn trading(&self) -> TradingEndpoints<'_> {
        TradingEndpoints::new(self)
    }

    /// Place a new order
    pub async fn create_order(&self, order: &OrderRequest) -> RestResult<Params> {
        self.trading().create_order(order).await
    }

    /// Get the status of an order by id
    pub async fn get_order_status(&self, order_id: u64) -> RestResult<Value> {
        self.trading().get_order_status(order_id).await
    }

    /// Cancel an order by id
    pub async fn cancel_order(&self, order_id: u64) -> RestResult<Params> {
        self.trading().cancel_order(order_id).await
    }

    /// Cancel orders matching a filter
    pub async fn cancel_orders(&self, filter: &OrderFilter) -> RestResult<Value> {
        self.trading().cancel_orders(filter).await
    }
}

impl Default for PayeerClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PayeerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayeerClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}
