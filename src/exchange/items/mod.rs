//! Cursor-paginated item listings.
//!
//! [`Items`] fetches one page at a time with [`Items::get_items`], or streams
//! every page of a listing from a background task with
//! [`Items::market_items`] and [`Items::user_items`].

mod options;
mod stream;
mod types;

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::DmarketError;
use crate::rest::{ApiRequest, Requester, catch_panic, exchange};

pub use options::{DEFAULT_PRICE_FROM, DEFAULT_PRICE_TO, ItemsOptions, ListingQuery, MAX_LIMIT};
pub use stream::ItemsStream;
pub use types::{Extra, Gem, ItemsPage, Object, OwnerDetails, Price, RecommendedPrice, Sticker, Total};

/// Pages buffered between the producer task and the consumer.
pub const STREAM_BUFFER: usize = 1;

/// Which listing to page through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemsEndpoint {
    /// Items offered on the market.
    Market,
    /// Items in the authenticated user's inventory.
    User,
}

impl ItemsEndpoint {
    /// Request path.
    pub fn path(self) -> &'static str {
        match self {
            ItemsEndpoint::Market => exchange::MARKET_ITEMS,
            ItemsEndpoint::User => exchange::USER_ITEMS,
        }
    }
}

impl std::fmt::Display for ItemsEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Paginator over an items listing.
///
/// Holds the transport and the [`ListingQuery`]. A paginator is meant for a
/// single listing at a time; streaming consumes it.
pub struct Items<R> {
    requester: Arc<R>,
    query: ListingQuery,
}

impl<R> Clone for Items<R> {
    fn clone(&self) -> Self {
        Self {
            requester: Arc::clone(&self.requester),
            query: self.query.clone(),
        }
    }
}

impl<R> std::fmt::Debug for Items<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Items").field("query", &self.query).finish()
    }
}

impl<R: Requester + 'static> Items<R> {
    /// Paginator with the default query.
    pub fn new(requester: Arc<R>) -> Self {
        Self {
            requester,
            query: ListingQuery::default(),
        }
    }

    /// Current query.
    pub fn query(&self) -> &ListingQuery {
        &self.query
    }

    /// Cursor the next request will send.
    pub fn cursor(&self) -> &str {
        self.query.cursor()
    }

    /// Apply listing filters.
    pub fn apply(&mut self, options: &ItemsOptions) {
        self.query.apply(options);
    }

    /// Fetch the page at the current cursor and advance to the next one.
    ///
    /// Anything but `200 OK` fails with [`DmarketError::UnexpectedStatus`],
    /// and a body that is not a page fails with [`DmarketError::Decode`].
    /// The cursor is left untouched on error.
    pub async fn get_items(
        &mut self,
        endpoint: ItemsEndpoint,
        cancel: &CancellationToken,
    ) -> Result<ItemsPage, DmarketError> {
        let path = format!("{}?{}", endpoint.path(), self.query.to_query_string()?);
        let response = self
            .requester
            .execute(ApiRequest::get(path), cancel)
            .await?
            .error_for_status()?;

        let page: ItemsPage = response.json()?;
        self.query.set_cursor(page.cursor.clone());
        Ok(page)
    }

    /// Stream every page of the market listing.
    pub fn market_items(self, cancel: CancellationToken, options: &ItemsOptions) -> ItemsStream {
        self.stream(ItemsEndpoint::Market, cancel, options)
    }

    /// Stream every page of the user's inventory.
    pub fn user_items(self, cancel: CancellationToken, options: &ItemsOptions) -> ItemsStream {
        self.stream(ItemsEndpoint::User, cancel, options)
    }

    /// Stream every page of `endpoint`, starting at the current cursor.
    ///
    /// Must be called from within a Tokio runtime. The producer stops when
    /// `cancel` fires, when the returned stream is dropped, after an empty
    /// page, or after delivering an error.
    pub fn stream(
        mut self,
        endpoint: ItemsEndpoint,
        cancel: CancellationToken,
        options: &ItemsOptions,
    ) -> ItemsStream {
        self.apply(options);

        let cancel = cancel.child_token();
        let (sender, receiver) = mpsc::channel(STREAM_BUFFER);
        tokio::spawn(self.run(endpoint, cancel.clone(), sender));

        ItemsStream::new(receiver, cancel)
    }

    async fn run(
        mut self,
        endpoint: ItemsEndpoint,
        cancel: CancellationToken,
        sender: mpsc::Sender<Result<ItemsPage, DmarketError>>,
    ) {
        let mut pages = 0usize;

        loop {
            if cancel.is_cancelled() {
                break;
            }

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = sender.closed() => break,
                result = catch_panic(self.get_items(endpoint, &cancel)) => result,
            };

            match result {
                Ok(page) if page.is_empty() => {
                    tracing::debug!(%endpoint, pages, "listing exhausted");
                    break;
                }
                Ok(page) => {
                    pages += 1;
                    tracing::trace!(%endpoint, pages, items = page.objects.len(), "page received");
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => break,
                        sent = sender.send(Ok(page)) => {
                            if sent.is_err() {
                                break;
                            }
                        }
                    }
                }
                Err(err) => {
                    if cancel.is_cancelled() {
                        break;
                    }
                    tracing::warn!(%endpoint, pages, error = %err, "listing request failed");
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => {}
                        _ = sender.send(Err(err)) => {}
                    }
                    break;
                }
            }
        }

        tracing::debug!(%endpoint, pages, cancelled = cancel.is_cancelled(), "items stream closed");
    }
}
