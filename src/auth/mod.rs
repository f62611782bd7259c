//! Authentication module for DMarket API.
//!
//! This module provides:
//! - Credential management with validated keys and secret storage
//! - A clock abstraction for the signing timestamp
//! - Ed25519 signature generation for authenticated requests

mod clock;
mod credentials;
mod signature;

pub use clock::{Clock, FixedClock, SystemClock};
pub use credentials::{
    Credentials, PRIVATE_KEY_ENV, PRIVATE_KEY_HEX_LEN, PUBLIC_KEY_ENV, PUBLIC_KEY_HEX_LEN,
};
pub use signature::{AuthHeaders, SIGNATURE_SCHEME, sign_request, signing_string};
