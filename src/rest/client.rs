//! DMarket REST API client implementation.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use reqwest_tracing::TracingMiddleware;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::auth::{AuthHeaders, Clock, Credentials, SystemClock};
use crate::error::DmarketError;
use crate::exchange::Exchange;
use crate::rate_limit::{RateLimitConfig, RateLimiter};
use crate::rest::endpoints::{DMARKET_BASE_URL, headers};
use crate::rest::traits::Requester;
use crate::rest::{ApiRequest, ApiResponse};

/// Default HTTP timeout for a single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The DMarket REST API client.
///
/// Every request waits for the shared rate limiter, is signed with the
/// client's ed25519 key and carries JSON `Accept`/`Content-Type` headers.
/// Cloning is cheap: clones share the connection pool and the rate limiter.
///
/// # Example
///
/// ```rust,no_run
/// use dmarket_api_client::exchange::ItemsOptions;
/// use dmarket_api_client::rest::DmarketClient;
/// use futures_util::StreamExt;
/// use tokio_util::sync::CancellationToken;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = DmarketClient::new(
///         "https://api.dmarket.com",
///         std::env::var("DMARKET_PUBLIC_KEY")?,
///         std::env::var("DMARKET_PRIVATE_KEY")?,
///     )?;
///
///     let options = ItemsOptions::new().price_range(100, 500)?.limit_per_request(50)?;
///     let mut pages = client
///         .exchange()
///         .items()
///         .market_items(CancellationToken::new(), &options);
///
///     while let Some(page) = pages.next().await {
///         println!("{} items", page?.objects.len());
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct DmarketClient {
    http_client: ClientWithMiddleware,
    base_url: Url,
    credentials: Credentials,
    rate_limiter: RateLimiter,
    clock: Arc<dyn Clock>,
}

impl DmarketClient {
    /// Create a client with default settings.
    ///
    /// Fails if the public key is not 64 hex chars, the private key is not
    /// 128 hex chars, or `base_url` has no host.
    pub fn new(
        base_url: &str,
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Result<Self, DmarketError> {
        let credentials = Credentials::new(public_key, private_key)?;
        Self::builder()
            .base_url(base_url)
            .credentials(credentials)
            .build()
    }

    /// Create a new client builder.
    pub fn builder() -> DmarketClientBuilder {
        DmarketClientBuilder::new()
    }

    /// The resolved base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The credentials used for signing.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The rate limiter shared by this client and its clones.
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Exchange API services backed by a clone of this client.
    pub fn exchange(&self) -> Exchange<DmarketClient> {
        Exchange::new(Arc::new(self.clone()))
    }

    async fn send(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse, DmarketError> {
        self.rate_limiter.acquire(cancel).await?;

        let url = self.base_url.join(&request.endpoint)?;
        let request_uri = request_uri(&url);
        let auth = AuthHeaders::new(
            &self.credentials,
            request.method.as_str(),
            &request_uri,
            self.clock.as_ref(),
        );

        tracing::debug!(method = %request.method, uri = %request_uri, "sending request");

        let mut builder = self
            .http_client
            .request(request.method.clone(), url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .header(headers::API_KEY, auth.api_key)
            .header(headers::SIGN_DATE, auth.sign_date)
            .header(headers::REQUEST_SIGN, auth.request_sign);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let content_length = response.content_length();
        let body = response.bytes().await?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "received response");

        Ok(ApiResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            content_length,
            body: body.to_vec(),
        })
    }
}

impl Requester for DmarketClient {
    async fn execute(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse, DmarketError> {
        catch_panic(self.send(request, cancel)).await
    }
}

impl std::fmt::Debug for DmarketClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DmarketClient")
            .field("base_url", &self.base_url.as_str())
            .field("credentials", &self.credentials)
            .field("rate_limiter", &self.rate_limiter)
            .finish()
    }
}

/// Path plus query, exactly as it goes on the request line.
fn request_uri(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

/// Run `future`, turning a panic into [`DmarketError::Internal`].
pub(crate) async fn catch_panic<F, T>(future: F) -> Result<T, DmarketError>
where
    F: Future<Output = Result<T, DmarketError>>,
{
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(result) => result,
        Err(panic) => {
            let message = panic_message(panic.as_ref());
            tracing::error!(%message, "panic while performing request");
            Err(DmarketError::Internal(format!(
                "unexpected error when performing request: {message}"
            )))
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Builder for [`DmarketClient`].
pub struct DmarketClientBuilder {
    base_url: String,
    credentials: Option<Credentials>,
    rate_limiter: Option<RateLimiter>,
    rate_limit: RateLimitConfig,
    clock: Option<Arc<dyn Clock>>,
    user_agent: Option<String>,
    timeout: Duration,
    max_retries: u32,
}

impl DmarketClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DMARKET_BASE_URL.to_string(),
            credentials: None,
            rate_limiter: None,
            rate_limit: RateLimitConfig::default(),
            clock: None,
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
            max_retries: 0,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the credentials used to sign requests.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Share an existing rate limiter instead of creating a new one.
    pub fn rate_limiter(mut self, limiter: RateLimiter) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    /// Configure the rate limiter created by [`build`](Self::build).
    ///
    /// Ignored when [`rate_limiter`](Self::rate_limiter) is set.
    pub fn rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.rate_limit = config;
        self
    }

    /// Set the time source for `X-Sign-Date`.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the timeout for a single request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retry transient failures up to `retries` times. Disabled by default.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<DmarketClient, DmarketError> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| DmarketError::InvalidBaseUrl(format!("{}: {e}", self.base_url)))?;
        if base_url.host_str().is_none_or(str::is_empty) {
            return Err(DmarketError::InvalidBaseUrl(format!(
                "{}: expected [scheme:][//[userinfo@]host]",
                self.base_url
            )));
        }

        let credentials = self.credentials.ok_or_else(|| {
            DmarketError::Configuration("public and private keys are required".to_string())
        })?;

        let rate_limiter = match self.rate_limiter {
            Some(limiter) => limiter,
            None => RateLimiter::new(self.rate_limit)?,
        };

        // Build default headers.
        let mut default_headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("dmarket-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("dmarket-api-client"));
        default_headers.insert(USER_AGENT, header_value);

        let reqwest_client = reqwest::Client::builder()
            .default_headers(default_headers)
            .timeout(self.timeout)
            .build()?;

        let mut client = ClientBuilder::new(reqwest_client).with(TracingMiddleware::default());
        if self.max_retries > 0 {
            let retry_policy =
                ExponentialBackoff::builder().build_with_max_retries(self.max_retries);
            client = client.with(RetryTransientMiddleware::new_with_policy(retry_policy));
        }

        Ok(DmarketClient {
            http_client: client.build(),
            base_url,
            credentials,
            rate_limiter,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
        })
    }
}

impl Default for DmarketClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
