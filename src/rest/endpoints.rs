//! DMarket REST API endpoint constants.

/// Base URL for the DMarket REST API.
pub const DMARKET_BASE_URL: &str = "https://api.dmarket.com";

/// Exchange endpoints.
pub mod exchange {
    /// Items listed on the market.
    pub const MARKET_ITEMS: &str = "/exchange/v1/market/items";
    /// Items in the user's inventory.
    pub const USER_ITEMS: &str = "/exchange/v1/user/items";
}

/// Authentication header names.
pub mod headers {
    /// Hex public key.
    pub const API_KEY: &str = "X-Api-Key";
    /// Unix seconds used in the signature.
    pub const SIGN_DATE: &str = "X-Sign-Date";
    /// `dmar ed25519 <hex-signature>`.
    pub const REQUEST_SIGN: &str = "X-Request-Sign";
}

/// Fixed query parameter values sent with every listing request.
pub mod query {
    /// Catalog (game) identifier.
    pub const GAME_ID: &str = "9a92";
    /// Price currency.
    pub const CURRENCY: &str = "USD";
}
