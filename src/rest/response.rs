//! Request and response values exchanged with the transport.

use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::error::DmarketError;

/// An outbound API request, before the base URL is applied and before signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the base URL, including the encoded query string.
    pub endpoint: String,
    /// Request body, if any.
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Create a request without a body.
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            body: None,
        }
    }

    /// A GET request.
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    /// Attach a body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// A fully read API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Canonical reason phrase (e.g., "OK", "Not Found").
    pub status_text: String,
    /// `Content-Length` reported by the server, if any.
    pub content_length: Option<u64>,
    /// Response body.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// True for `200 OK`.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Fail with [`DmarketError::UnexpectedStatus`] unless the status is 200.
    pub fn error_for_status(self) -> Result<Self, DmarketError> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(DmarketError::unexpected_status(
                self.status,
                &self.status_text,
                &self.body,
            ))
        }
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, DmarketError> {
        serde_json::from_slice(&self.body).map_err(|source| DmarketError::Decode {
            source,
            body: self.text(),
        })
    }
}
