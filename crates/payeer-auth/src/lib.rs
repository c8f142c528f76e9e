//! Authentication primitives for the Payeer Trade API
//!
//! The trade API authenticates requests with a shared-secret HMAC scheme:
//! the `API-SIGN` header carries the lowercase hex HMAC-SHA256 of the
//! endpoint method name concatenated with the exact JSON body sent, keyed
//! by the account secret. The account identifier travels in plaintext in
//! the `API-ID` header.
//!
//! # Security
//!
//! Secrets are stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

pub mod credentials;
pub mod error;

pub use credentials::Credentials;
pub use error::{AuthError, AuthResult};
