//! Error types for the DMarket client library.

use serde::Deserialize;
use thiserror::Error;

/// The main error type for all DMarket client operations.
#[derive(Error, Debug)]
pub enum DmarketError {
    /// An option or builder value was rejected before any request was made
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Public or private key has the wrong length
    #[error(
        "wrong public or private key length: public key len {public_len} must be 64, private key len {private_len} must be 128"
    )]
    BadKeys {
        /// Length of the supplied public key
        public_len: usize,
        /// Length of the supplied private key
        private_len: usize,
    },

    /// Base URL could not be parsed or has no host
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Private key material is not valid hex or is too short
    #[error("Key decode error: {0}")]
    KeyDecode(String),

    /// Waiting for a rate limiter token was interrupted
    #[error("Request rate limiter wait was cancelled")]
    RateLimit,

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// The API answered with a status other than 200
    #[error("Unexpected HTTP response from DMarket: {status} {status_text}, body: {body}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase for the status
        status_text: String,
        /// Raw response body
        body: String,
        /// Runtime error parsed from the body, when it has that shape
        api_error: Option<ApiError>,
    },

    /// Response body did not match the expected shape
    #[error("Can not decode response body: {source}. Body: {body}")]
    Decode {
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
        /// Raw response body
        body: String,
    },

    /// A request failed in an unexpected way (for example a panic inside the transport)
    #[error("Unexpected error during request: {0}")]
    Internal(String),
}

impl DmarketError {
    /// Returns true for errors raised while validating configuration or construction input.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DmarketError::Configuration(_)
                | DmarketError::BadKeys { .. }
                | DmarketError::InvalidBaseUrl(_)
                | DmarketError::KeyDecode(_)
        )
    }

    /// HTTP status code for [`DmarketError::UnexpectedStatus`].
    pub fn status(&self) -> Option<u16> {
        match self {
            DmarketError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `"<code>: <reason>"` for [`DmarketError::UnexpectedStatus`], e.g. `"404: Not Found"`.
    pub fn status_representation(&self) -> Option<String> {
        match self {
            DmarketError::UnexpectedStatus {
                status,
                status_text,
                ..
            } => {
                let reason = reqwest::StatusCode::from_u16(*status)
                    .ok()
                    .and_then(|code| code.canonical_reason())
                    .unwrap_or(status_text.as_str());
                Some(format!("{status}: {reason}"))
            }
            _ => None,
        }
    }

    pub(crate) fn unexpected_status(status: u16, status_text: &str, body: &[u8]) -> Self {
        let api_error = serde_json::from_slice::<ApiError>(body).ok();
        DmarketError::UnexpectedStatus {
            status,
            status_text: status_text.to_string(),
            body: String::from_utf8_lossy(body).into_owned(),
            api_error,
        }
    }
}

/// Runtime error body returned by the DMarket API.
///
/// ```text
/// {"error": "...", "code": 500, "message": "...", "details": [{"type_url": "...", "value": "..."}]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiError {
    /// Short error identifier
    pub error: String,
    /// Numeric error code
    pub code: i64,
    /// Human-readable error message
    #[serde(default)]
    pub message: String,
    /// Additional error details
    #[serde(default)]
    pub details: Vec<ApiErrorDetail>,
}

/// One entry of [`ApiError::details`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorDetail {
    /// Type URL of the detail payload
    pub type_url: String,
    /// Detail payload
    pub value: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DMarket API runtime error: err: {} [code: {}], message: {} details: ",
            self.error, self.code, self.message
        )?;
        for (i, detail) in self.details.iter().enumerate() {
            write!(
                f,
                "[{}](typeURL: {}, value: {}) ",
                i, detail.type_url, detail.value
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let error = ApiError {
            error: "runtime".to_string(),
            code: 500,
            message: "runtimeError error".to_string(),
            details: vec![ApiErrorDetail {
                type_url: "TypeURL".to_string(),
                value: "https://url.url/path?q=q".to_string(),
            }],
        };
        assert_eq!(
            error.to_string(),
            "DMarket API runtime error: err: runtime [code: 500], message: runtimeError error details: [0](typeURL: TypeURL, value: https://url.url/path?q=q) "
        );
    }

    #[test]
    fn test_unexpected_status_parses_api_error() {
        let body = br#"{"error":"Unauthorized","code":401,"message":"bad signature","details":[]}"#;
        let error = DmarketError::unexpected_status(401, "Unauthorized", body);
        assert_eq!(error.status(), Some(401));
        match error {
            DmarketError::UnexpectedStatus { api_error, .. } => {
                let api_error = api_error.unwrap();
                assert_eq!(api_error.code, 401);
                assert_eq!(api_error.message, "bad signature");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_status_representation() {
        let error = DmarketError::unexpected_status(404, "Not Found", b"");
        assert_eq!(error.status_representation().as_deref(), Some("404: Not Found"));

        let error = DmarketError::unexpected_status(502, "", b"upstream");
        assert_eq!(error.status_representation().as_deref(), Some("502: Bad Gateway"));

        assert_eq!(DmarketError::RateLimit.status_representation(), None);
    }

    #[test]
    fn test_unexpected_status_keeps_plain_body() {
        let error = DmarketError::unexpected_status(400, "Bad Request", b"400: Bad Request");
        let message = error.to_string();
        assert!(message.contains("400"));
        assert!(message.contains("Bad Request"));
        assert!(!error.is_configuration());
    }

    #[test]
    fn test_bad_keys_message() {
        let error = DmarketError::BadKeys {
            public_len: 3,
            private_len: 0,
        };
        assert!(error.is_configuration());
        assert!(error.to_string().contains("must be 64"));
        assert!(error.to_string().contains("must be 128"));
    }
}
