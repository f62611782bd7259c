//! # DMarket Client
//!
//! An async Rust client library for the DMarket marketplace REST API.
//!
//! ## Features
//!
//! - ed25519 request signing
//! - Shared token bucket rate limiting
//! - Cursor pagination with cancellable page streams
//! - Strong typing for listing responses
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dmarket_api_client::DmarketClient;
//! use dmarket_api_client::auth::Credentials;
//! use dmarket_api_client::exchange::ItemsOptions;
//! use dmarket_api_client::rest::DMARKET_BASE_URL;
//! use futures_util::StreamExt;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials::from_env()?;
//!     let client = DmarketClient::builder()
//!         .base_url(DMARKET_BASE_URL)
//!         .credentials(credentials)
//!         .build()?;
//!
//!     let options = ItemsOptions::new().limit_per_request(100)?;
//!     let mut pages = client
//!         .exchange()
//!         .items()
//!         .market_items(CancellationToken::new(), &options);
//!     while let Some(page) = pages.next().await {
//!         let page = page?;
//!         println!("{} items, cursor {}", page.objects.len(), page.cursor);
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod exchange;
pub mod rate_limit;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ApiError, DmarketError};
pub use rest::DmarketClient;

/// Result type alias using DmarketError
pub type Result<T> = std::result::Result<T, DmarketError>;
