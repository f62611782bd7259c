//! DMarket Exchange API.
//!
//! # Example
//!
//! ```rust,no_run
//! use dmarket_api_client::DmarketClient;
//! use dmarket_api_client::exchange::{ItemsEndpoint, ItemsOptions};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run(client: DmarketClient) -> Result<(), dmarket_api_client::DmarketError> {
//! // Single page
//! let mut items = client.exchange().items();
//! items.apply(&ItemsOptions::new().title("AK-47 | Redline"));
//! let page = items.get_items(ItemsEndpoint::Market, &CancellationToken::new()).await?;
//! println!("{} items, next cursor {}", page.objects.len(), items.cursor());
//! # Ok(())
//! # }
//! ```

pub mod items;

use std::sync::Arc;

use crate::rest::Requester;

pub use items::{
    Extra, Gem, Items, ItemsEndpoint, ItemsOptions, ItemsPage, ItemsStream, ListingQuery, Object,
    OwnerDetails, Price, RecommendedPrice, STREAM_BUFFER, Sticker, Total,
};

/// Exchange API services sharing one transport.
pub struct Exchange<R> {
    items: Items<R>,
}

impl<R: Requester + 'static> Exchange<R> {
    /// Services backed by `requester`.
    pub fn new(requester: Arc<R>) -> Self {
        Self {
            items: Items::new(requester),
        }
    }

    /// A fresh items paginator.
    pub fn items(&self) -> Items<R> {
        self.items.clone()
    }
}

impl<R> std::fmt::Debug for Exchange<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exchange").finish_non_exhaustive()
    }
}
