//! Transport trait for the DMarket REST API.
//!
//! The [`Requester`] trait is the seam between the listing paginator and the
//! network. This enables:
//! - Mock implementations for testing
//! - Decorators (e.g., extra logging or metrics)
//! - Alternative HTTP stacks
//!
//! # Example
//!
//! ```rust,ignore
//! use dmarket_api_client::rest::{Requester, RequesterExt};
//!
//! async fn ping<R: Requester>(client: &R) -> Result<u16, dmarket_api_client::DmarketError> {
//!     let response = client.get("/exchange/v1/market/items?limit=1").await?;
//!     Ok(response.status)
//! }
//! ```

use std::future::Future;

use reqwest::Method;
use tokio_util::sync::CancellationToken;

use crate::error::DmarketError;
use crate::rest::{ApiRequest, ApiResponse};

/// Trait defining an authenticated DMarket transport.
///
/// Implementations resolve the endpoint against a base URL, wait for the rate
/// limiter (giving up with [`DmarketError::RateLimit`] once `cancel` fires),
/// sign the request and return the fully read response.
pub trait Requester: Send + Sync {
    /// Perform one request.
    fn execute(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<ApiResponse, DmarketError>> + Send;
}

/// HTTP verb helpers for any [`Requester`].
///
/// These calls are never cancelled from the outside.
pub trait RequesterExt: Requester {
    /// Perform a GET request.
    fn get(
        &self,
        endpoint: &str,
    ) -> impl Future<Output = Result<ApiResponse, DmarketError>> + Send {
        self.uncancelled(ApiRequest::new(Method::GET, endpoint))
    }

    /// Perform a POST request with a JSON body.
    fn post(
        &self,
        endpoint: &str,
        body: impl Into<Vec<u8>>,
    ) -> impl Future<Output = Result<ApiResponse, DmarketError>> + Send {
        self.uncancelled(ApiRequest::new(Method::POST, endpoint).with_body(body))
    }

    /// Perform a PATCH request with a JSON body.
    fn patch(
        &self,
        endpoint: &str,
        body: impl Into<Vec<u8>>,
    ) -> impl Future<Output = Result<ApiResponse, DmarketError>> + Send {
        self.uncancelled(ApiRequest::new(Method::PATCH, endpoint).with_body(body))
    }

    /// Perform a DELETE request with a JSON body.
    fn delete(
        &self,
        endpoint: &str,
        body: impl Into<Vec<u8>>,
    ) -> impl Future<Output = Result<ApiResponse, DmarketError>> + Send {
        self.uncancelled(ApiRequest::new(Method::DELETE, endpoint).with_body(body))
    }

    #[doc(hidden)]
    fn uncancelled(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, DmarketError>> + Send {
        async move {
            let cancel = CancellationToken::new();
            self.execute(request, &cancel).await
        }
    }
}

impl<R: Requester> RequesterExt for R {}
