//! Error types for the Up API client.
//!
//! Every fallible operation in this crate returns [`Result`], whose error
//! side is the single [`Error`] enum below. Errors raised by the transport are
//! passed through the pagination engine unchanged.

use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for Up API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Up API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed before a response was received
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned a non-success response not covered by a more specific variant
    #[error("API error: status={status}, title={title}, detail={detail}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Short summary of the problem, from the JSON:API error object
        title: String,
        /// Human-readable explanation of the problem
        detail: String,
        /// Raw response body for debugging
        body: Value,
    },

    /// The bearer token was missing, malformed or revoked (401)
    #[error("Not authorized: {detail}")]
    NotAuthorized {
        /// Human-readable explanation from the API
        detail: String,
    },

    /// The token has exhausted its request allowance (429)
    #[error("Rate limit exceeded: {detail}")]
    RateLimited {
        /// Human-readable explanation from the API
        detail: String,
    },

    /// The requested resource does not exist (404)
    #[error("Not found: {detail}")]
    NotFound {
        /// Human-readable explanation from the API
        detail: String,
    },

    /// A paginated list was indexed past its last reachable element
    #[error("index {index} out of range for paginated list of {len} element(s)")]
    IndexOutOfRange {
        /// The requested position
        index: usize,
        /// Number of elements the list holds once pagination is exhausted
        len: usize,
    },

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` if this error is potentially transient and the
    /// operation could be retried by the caller.
    ///
    /// The client never retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout() || e.is_connect(),
            Error::RateLimited { .. } => true,
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is an authentication-related error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::NotAuthorized { .. })
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (invalid input, bad request, etc.).
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 400 && *status < 500,
            Error::NotAuthorized { .. }
            | Error::RateLimited { .. }
            | Error::NotFound { .. }
            | Error::InvalidInput(_)
            | Error::UrlParse(_)
            | Error::Config(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns the HTTP status code associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::NotAuthorized { .. } => Some(401),
            Error::NotFound { .. } => Some(404),
            Error::RateLimited { .. } => Some(429),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Create an error from a non-success response.
    ///
    /// The Up API reports failures as a JSON:API document holding an
    /// `errors` array; the first entry supplies the title and detail.
    pub(crate) fn from_api_response(status: u16, body: Value) -> Self {
        let first = body.get("errors").and_then(|e| e.get(0));

        let title = first
            .and_then(|e| e.get("title"))
            .and_then(|t| t.as_str())
            .unwrap_or("Unknown API error")
            .to_string();

        let detail = first
            .and_then(|e| e.get("detail"))
            .and_then(|d| d.as_str())
            .unwrap_or_default()
            .to_string();

        match status {
            401 => Error::NotAuthorized { detail },
            404 => Error::NotFound { detail },
            429 => Error::RateLimited { detail },
            _ => Error::Api {
                status,
                title,
                detail,
                body,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        assert!(Error::RateLimited { detail: "slow down".into() }.is_retryable());
        assert!(!Error::InvalidInput("bad".into()).is_retryable());
        assert!(!Error::IndexOutOfRange { index: 3, len: 1 }.is_retryable());
    }

    #[test]
    fn test_error_auth() {
        assert!(Error::NotAuthorized { detail: String::new() }.is_auth_error());
        assert!(!Error::NotFound { detail: String::new() }.is_auth_error());
    }

    #[test]
    fn test_from_api_response() {
        let body = serde_json::json!({
            "errors": [{
                "status": "400",
                "title": "Invalid request parameter",
                "detail": "`page[size]` must be less than or equal to 100",
                "source": { "parameter": "page[size]" }
            }]
        });

        let err = Error::from_api_response(400, body);
        match err {
            Error::Api {
                status,
                title,
                detail,
                ..
            } => {
                assert_eq!(status, 400);
                assert_eq!(title, "Invalid request parameter");
                assert_eq!(detail, "`page[size]` must be less than or equal to 100");
            }
            _ => panic!("Expected Api error"),
        }
    }

    #[test]
    fn test_from_api_response_maps_known_statuses() {
        let body = serde_json::json!({
            "errors": [{
                "status": "401",
                "title": "Not Authorized",
                "detail": "The request was not authenticated because no valid credential was found."
            }]
        });

        let err = Error::from_api_response(401, body);
        assert!(err.is_auth_error());
        assert_eq!(err.status(), Some(401));

        let err = Error::from_api_response(429, Value::Null);
        assert!(matches!(err, Error::RateLimited { .. }));
        assert!(err.is_retryable());

        let err = Error::from_api_response(503, Value::Null);
        assert!(err.is_server_error());
        assert_eq!(err.status(), Some(503));
    }
}
