//! Listing filters and the query state owned by the paginator.

use serde::Serialize;

use crate::error::DmarketError;
use crate::rest::query::{CURRENCY, GAME_ID};

/// Largest page size the API accepts.
pub const MAX_LIMIT: u32 = 100;
/// Default lower price bound, in cents.
pub const DEFAULT_PRICE_FROM: i64 = 0;
/// Default upper price bound, in cents.
pub const DEFAULT_PRICE_TO: i64 = 1_000_000;

/// Filters for an items listing.
///
/// Every setter checks its own arguments and returns an error instead of
/// accepting a value the API would reject. Unset filters keep the
/// paginator's current values.
///
/// # Example
///
/// ```rust
/// use dmarket_api_client::exchange::ItemsOptions;
///
/// let options = ItemsOptions::new()
///     .price_range(100, 2_000)?
///     .limit_per_request(50)?
///     .title("AK-47 | Redline");
///
/// assert!(ItemsOptions::new().price_range(10, 5).is_err());
/// assert!(ItemsOptions::new().limit_per_request(0).is_err());
/// # Ok::<(), dmarket_api_client::DmarketError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemsOptions {
    price_range: Option<(i64, i64)>,
    limit: Option<u32>,
    title: Option<String>,
}

impl ItemsOptions {
    /// Options that change nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict prices to `price_from..=price_to` (cents).
    ///
    /// Requires `price_from >= 0` and `price_to >= price_from`.
    pub fn price_range(mut self, price_from: i64, price_to: i64) -> Result<Self, DmarketError> {
        if price_from < 0 || price_to < price_from {
            return Err(DmarketError::Configuration(format!(
                "incorrect price range [priceFrom {price_from} priceTo {price_to}] => priceFrom >= 0 && priceTo >= priceFrom"
            )));
        }
        self.price_range = Some((price_from, price_to));
        Ok(self)
    }

    /// Items per request, in `1..=100`.
    pub fn limit_per_request(mut self, limit: u32) -> Result<Self, DmarketError> {
        if limit == 0 || limit > MAX_LIMIT {
            return Err(DmarketError::Configuration(format!(
                "item limit per request must be in 1..={MAX_LIMIT}, got {limit}"
            )));
        }
        self.limit = Some(limit);
        Ok(self)
    }

    /// Only items with this title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Query state for one listing: filters plus the server cursor.
///
/// Owned by a single [`Items`](super::Items) paginator; the cursor is
/// replaced after every successful page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    title: String,
    price_from: i64,
    price_to: i64,
    limit: u32,
    cursor: String,
}

impl ListingQuery {
    /// Title filter (empty means any).
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Lower price bound.
    pub fn price_from(&self) -> i64 {
        self.price_from
    }

    /// Upper price bound.
    pub fn price_to(&self) -> i64 {
        self.price_to
    }

    /// Page size.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Cursor of the next page (empty before the first request).
    pub fn cursor(&self) -> &str {
        &self.cursor
    }

    pub(crate) fn apply(&mut self, options: &ItemsOptions) {
        if let Some((price_from, price_to)) = options.price_range {
            self.price_from = price_from;
            self.price_to = price_to;
        }
        if let Some(limit) = options.limit {
            self.limit = limit;
        }
        if let Some(title) = &options.title {
            self.title.clone_from(title);
        }
    }

    pub(crate) fn set_cursor(&mut self, cursor: String) {
        self.cursor = cursor;
    }

    /// Encoded query string, keys in alphabetical order.
    pub fn to_query_string(&self) -> Result<String, DmarketError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params<'a> {
            currency: &'a str,
            cursor: &'a str,
            game_id: &'a str,
            limit: u32,
            price_from: i64,
            price_to: i64,
            title: &'a str,
        }

        serde_urlencoded::to_string(Params {
            currency: CURRENCY,
            cursor: &self.cursor,
            game_id: GAME_ID,
            limit: self.limit,
            price_from: self.price_from,
            price_to: self.price_to,
            title: &self.title,
        })
        .map_err(|e| DmarketError::Internal(format!("can not encode items query: {e}")))
    }
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            title: String::new(),
            price_from: DEFAULT_PRICE_FROM,
            price_to: DEFAULT_PRICE_TO,
            limit: MAX_LIMIT,
            cursor: String::new(),
        }
    }
}
