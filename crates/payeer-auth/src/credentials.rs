//! Authentication credentials for the Payeer Trade API
//!
//! Implements the HMAC-SHA256 request signature over `method + body` as
//! required for the trade API's authenticated endpoints.
//!
//! # Security
//!
//! The account secret is stored in a `secrecy::SecretBox` which zeroizes
//! the bytes on drop and redacts them from `Debug` output.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretBox};
use sha2::Sha256;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Environment variable holding the account identifier
pub const ENV_API_ID: &str = "PAYEER_API_ID";
/// Environment variable holding the account secret
pub const ENV_API_SECRET: &str = "PAYEER_API_SECRET";

/// Floor for issued timestamps so `ts` never decreases within a process,
/// even if the wall clock steps backwards between requests
static LAST_TS: AtomicU64 = AtomicU64::new(0);

/// API credentials for authenticated requests
///
/// The secret is automatically zeroized when the Credentials are dropped,
/// preventing sensitive data from remaining in memory.
pub struct Credentials {
    /// Account identifier, sent in plaintext as the `API-ID` header
    api_id: String,
    /// Shared secret used as the HMAC key (zeroized on drop)
    secret: SecretBox<Vec<u8>>,
}

impl Credentials {
    /// Create new credentials from an account identifier and secret
    ///
    /// # Arguments
    /// * `api_id` - Your Payeer API identifier
    /// * `secret` - Your API secret (plaintext shared secret)
    ///
    /// # Returns
    /// Result containing Credentials or an error if either part is empty
    pub fn new(api_id: impl Into<String>, secret: impl AsRef<str>) -> AuthResult<Self> {
        let api_id = api_id.into();
        let secret = secret.as_ref();

        if api_id.is_empty() || secret.is_empty() {
            return Err(AuthError::InvalidCredentials(
                "API id and secret must be non-empty".to_string(),
            ));
        }

        Ok(Self {
            api_id,
            secret: SecretBox::new(Box::new(secret.as_bytes().to_vec())),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `PAYEER_API_ID` and `PAYEER_API_SECRET` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_id = std::env::var(ENV_API_ID)
            .map_err(|_| AuthError::EnvVarNotSet(ENV_API_ID.to_string()))?;
        let secret = std::env::var(ENV_API_SECRET)
            .map_err(|_| AuthError::EnvVarNotSet(ENV_API_SECRET.to_string()))?;

        Self::new(api_id, secret)
    }

    /// Get the account identifier
    pub fn api_id(&self) -> &str {
        &self.api_id
    }

    /// Current Unix time in milliseconds for the `ts` request field
    ///
    /// Timestamps must not decrease across sequential requests. We keep an
    /// atomic floor of the last issued value to absorb clock steps.
    pub fn unix_millis() -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_millis() as u64;

        let floor = LAST_TS.fetch_max(now, Ordering::SeqCst);
        now.max(floor)
    }

    /// Sign a request for the trade API
    ///
    /// The signature is the lowercase hex HMAC-SHA256, keyed by the secret,
    /// of the method name concatenated with the JSON body. The body passed
    /// here must be byte-identical to the body transmitted.
    ///
    /// # Arguments
    /// * `method` - API method name (e.g., "account", "order_create")
    /// * `body` - Serialized JSON request body
    ///
    /// # Returns
    /// Lowercase hex-encoded signature for the `API-SIGN` header
    pub fn sign(&self, method: &str, body: &str) -> String {
        // expose_secret() provides controlled access to the key
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret())
            .expect("HMAC can take key of any size");
        mac.update(method.as_bytes());
        mac.update(body.as_bytes());

        hex::encode(mac.finalize().into_bytes())
    }
}

impl Clone for Credentials {
    /// Clone credentials (creates a new SecretBox with the same content)
    fn clone(&self) -> Self {
        Self {
            api_id: self.api_id.clone(),
            secret: SecretBox::new(Box::new(self.secret.expose_secret().clone())),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_id", &self.api_id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
