//! Ed25519 request signing for DMarket API authentication.
//!
//! Every request carries a signature computed as:
//! ```text
//! hex(ed25519_sign(METHOD + REQUEST_URI + UNIX_TIMESTAMP, private_key))
//! ```
//!
//! `REQUEST_URI` is the path plus the encoded query string. The signature is
//! sent in `X-Request-Sign` as `dmar ed25519 <hex>`, next to the timestamp in
//! `X-Sign-Date` and the public key in `X-Api-Key`.

use ed25519_dalek::Signer;

use crate::auth::{Clock, Credentials};

/// Prefix of the `X-Request-Sign` header value.
pub const SIGNATURE_SCHEME: &str = "dmar ed25519";

/// Build the exact byte string that gets signed.
pub fn signing_string(method: &str, request_uri: &str, timestamp: i64) -> String {
    format!("{method}{request_uri}{timestamp}")
}

/// Sign a request for the DMarket API.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the private key
/// * `method` - HTTP method in upper case (e.g., "GET")
/// * `request_uri` - Path and encoded query (e.g., "/exchange/v1/market/items?limit=10")
/// * `timestamp` - Unix seconds, the same value sent in `X-Sign-Date`
///
/// # Returns
///
/// The `X-Request-Sign` header value: `dmar ed25519 <hex-signature>`.
/// Signing cannot fail: the key was decoded when `credentials` was built.
///
/// # Example
///
/// ```rust
/// use dmarket_api_client::auth::{Credentials, sign_request};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new(
///     "8a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c",
///     "0101010101010101010101010101010101010101010101010101010101010101\
///      8a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c",
/// )?;
/// let signature = sign_request(&credentials, "GET", "/exchange/v1/market/items?limit=1", 1_700_000_000);
/// assert!(signature.starts_with("dmar ed25519 "));
/// # Ok(())
/// # }
/// ```
pub fn sign_request(
    credentials: &Credentials,
    method: &str,
    request_uri: &str,
    timestamp: i64,
) -> String {
    let message = signing_string(method, request_uri, timestamp);
    let signature = credentials.signing_key().sign(message.as_bytes());

    format!("{} {}", SIGNATURE_SCHEME, hex::encode(signature.to_bytes()))
}

/// The three authentication headers for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    /// `X-Api-Key`
    pub api_key: String,
    /// `X-Sign-Date`
    pub sign_date: String,
    /// `X-Request-Sign`
    pub request_sign: String,
}

impl AuthHeaders {
    /// Sign `method` + `request_uri` at the clock's current time.
    ///
    /// The timestamp is read once and used for both the signature and
    /// `X-Sign-Date`.
    pub fn new(
        credentials: &Credentials,
        method: &str,
        request_uri: &str,
        clock: &dyn Clock,
    ) -> Self {
        let timestamp = clock.unix_timestamp();
        let request_sign = sign_request(credentials, method, request_uri, timestamp);
        tracing::trace!(method, request_uri, timestamp, "signed request");

        Self {
            api_key: credentials.public_key().to_string(),
            sign_date: timestamp.to_string(),
            request_sign,
        }
    }
}
