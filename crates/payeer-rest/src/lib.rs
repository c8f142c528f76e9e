//! REST API client for the Payeer cryptocurrency trade API
//!
//! This crate provides a complete client for trading on Payeer, including
//! market data, account balances, and order execution.
//!
//! # Features
//!
//! - **Market Data**: Exchange info, ticker, order book, recent trades
//! - **Account**: Balances, own orders, own trade history
//! - **Trading**: Place, inspect, and cancel orders
//!
//! # Authentication
//!
//! All endpoints share one request pipeline. Whenever credentials are
//! configured the pipeline signs the request with HMAC-SHA256 over
//! `method + body` and sends the `API-ID` / `API-SIGN` headers; without
//! credentials the same pipeline issues unauthenticated requests. See
//! [`payeer_auth::Credentials`] for the signing scheme.
//!
//! # Example
//!
//! ```no_run
//! use payeer_rest::{Credentials, PayeerClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public market data (no auth required)
//!     let client = PayeerClient::new();
//!     let ticker = client.get_ticker("BTC_USDT").await?;
//!     println!("BTC/USDT: {:?}", ticker);
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = PayeerClient::with_credentials(creds);
//!     let balances = auth_client.get_account().await?;
//!     println!("Balances: {:?}", balances);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Error handling
//!
//! The API wraps every response in a `success`/`error` envelope. An
//! envelope with `success != true` surfaces as [`RestError::Api`] carrying
//! the server's error code; network failures surface separately as
//! [`RestError::Transport`]. The client never retries — backoff policy
//! belongs to the caller.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, PayeerClient};
pub use error::{RestError, RestResult, TransportError};
pub use payeer_auth::Credentials;
pub use transport::{HttpMethod, HttpRequest, HttpTransport, ReqwestTransport};
pub use types::{
    OrderAction, OrderFilter, OrderRequest, OrderType, Params, TradeFilter, DEFAULT_PAIR,
};
