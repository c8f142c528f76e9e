//! API endpoint implementations
//!
//! Each group is a thin declarative mapping over [`crate::PayeerClient::call`]:
//! method name, parameters, and the envelope field to unwrap.

pub mod account;
pub mod market;
pub mod trading;

pub use account::AccountEndpoints;
pub use market::MarketEndpoints;
pub use trading::TradingEndpoints;
