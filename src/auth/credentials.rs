//! Credential management for DMarket API authentication.

use ed25519_dalek::SigningKey;
use secrecy::{ExposeSecret, SecretString};

use crate::error::DmarketError;

/// Length of a hex-encoded ed25519 public key.
pub const PUBLIC_KEY_HEX_LEN: usize = 64;
/// Length of a hex-encoded ed25519 keypair (seed followed by public key).
pub const PRIVATE_KEY_HEX_LEN: usize = 128;

/// Default environment variable holding the public key.
pub const PUBLIC_KEY_ENV: &str = "DMARKET_PUBLIC_KEY";
/// Default environment variable holding the private key.
pub const PRIVATE_KEY_ENV: &str = "DMARKET_PRIVATE_KEY";

/// API credentials: the hex public key sent as `X-Api-Key` and the hex
/// private key used for signing.
///
/// Key lengths, hex encoding and the ed25519 keypair are checked on
/// construction, so a `Credentials` value always signs.
#[derive(Clone)]
pub struct Credentials {
    public_key: String,
    private_key: SecretString,
    signing_key: SigningKey,
}

impl Credentials {
    /// Create credentials from a 64-char hex public key and a 128-char hex private key.
    pub fn new(
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Result<Self, DmarketError> {
        let public_key = public_key.into();
        let private_key = private_key.into();

        if public_key.len() != PUBLIC_KEY_HEX_LEN || private_key.len() != PRIVATE_KEY_HEX_LEN {
            return Err(DmarketError::BadKeys {
                public_len: public_key.len(),
                private_len: private_key.len(),
            });
        }
        hex::decode(&public_key)
            .map_err(|e| DmarketError::KeyDecode(format!("public key is not valid hex: {e}")))?;
        let signing_key = decode_signing_key(&private_key)?;

        Ok(Self {
            public_key,
            private_key: SecretString::from(private_key),
            signing_key,
        })
    }

    /// Read credentials from `DMARKET_PUBLIC_KEY` and `DMARKET_PRIVATE_KEY`.
    pub fn from_env() -> Result<Self, DmarketError> {
        Self::from_env_vars(PUBLIC_KEY_ENV, PRIVATE_KEY_ENV)
    }

    /// Read credentials from custom environment variable names.
    pub fn from_env_vars(public_var: &str, private_var: &str) -> Result<Self, DmarketError> {
        let public_key = std::env::var(public_var).map_err(|_| {
            DmarketError::Configuration(format!("environment variable {public_var} not set"))
        })?;
        let private_key = std::env::var(private_var).map_err(|_| {
            DmarketError::Configuration(format!("environment variable {private_var} not set"))
        })?;
        Self::new(public_key, private_key)
    }

    /// The hex public key, passed through unmodified to `X-Api-Key`.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Get the hex private key for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.private_key.expose_secret()
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

/// Decode a hex ed25519 keypair (32-byte seed followed by the 32-byte public key).
fn decode_signing_key(private_key_hex: &str) -> Result<SigningKey, DmarketError> {
    let decoded = hex::decode(private_key_hex)
        .map_err(|e| DmarketError::KeyDecode(format!("private key is not valid hex: {e}")))?;
    let keypair: [u8; 64] = decoded
        .get(..64)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| {
            DmarketError::KeyDecode(format!(
                "private key decodes to {} bytes, expected 64",
                decoded.len()
            ))
        })?;

    SigningKey::from_keypair_bytes(&keypair)
        .map_err(|e| DmarketError::KeyDecode(format!("invalid ed25519 keypair: {e}")))
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}
