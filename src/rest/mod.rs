//! DMarket REST API transport.
//!
//! # Trait-based API
//!
//! The [`Requester`] trait abstracts the signed, rate-limited HTTP round trip,
//! enabling:
//! - Mock implementations for testing
//! - Decorators around the transport
//! - Alternative implementations
//!
//! ```rust,ignore
//! use dmarket_api_client::rest::{DmarketClient, RequesterExt};
//!
//! let client = DmarketClient::new(base_url, public_key, private_key)?;
//! let response = client.get("/exchange/v1/user/items?limit=1").await?;
//! println!("{} {}", response.status, response.text());
//! ```

mod client;
mod endpoints;
mod response;
mod traits;

pub(crate) use client::catch_panic;
pub use client::{DEFAULT_TIMEOUT, DmarketClient, DmarketClientBuilder};
pub use endpoints::*;
pub use response::{ApiRequest, ApiResponse};
pub use traits::{Requester, RequesterExt};
