//! The seam between paginated lists and the HTTP clients.
//!
//! Paginated lists never talk to `reqwest` directly. They fetch follow-up
//! pages through [`Transport`] (blocking) or [`AsyncTransport`] (async), which
//! both clients implement. Anything else implementing these traits, such as
//! a scripted fake in tests, can drive a list just as well.

use std::future::Future;
use std::pin::Pin;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::{Error, Result};

/// Type alias for a boxed future used by [`AsyncTransport`].
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One page of a JSON:API collection response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPage {
    /// The raw resource objects of this page, in server order.
    pub data: Vec<Value>,
    /// Pagination links. Absent for endpoints that are not paginated.
    #[serde(default)]
    pub links: PageLinks,
}

/// Pagination links of a [`RawPage`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageLinks {
    /// Full URL of the previous page, if any.
    #[serde(default)]
    pub prev: Option<String>,
    /// Full URL of the next page, or `None` on the last page.
    #[serde(default)]
    pub next: Option<String>,
}

/// Fetches pages on the caller's thread.
pub trait Transport {
    /// The URL prefix that relative paths are resolved against.
    fn base_url(&self) -> &str;

    /// Fetch the page at `path`, which is either relative to
    /// [`base_url`](Self::base_url) or an absolute URL.
    fn fetch_page(&self, path: &str) -> Result<RawPage>;
}

/// Fetches pages without blocking the calling task.
pub trait AsyncTransport: Send + Sync {
    /// The URL prefix that relative paths are resolved against.
    fn base_url(&self) -> &str;

    /// Fetch the page at `path`, which is either relative to
    /// [`base_url`](Self::base_url) or an absolute URL.
    fn fetch_page<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<RawPage>>;
}

/// Builds a list element from one raw resource object.
///
/// The client is passed along so that an element may keep a handle for
/// follow-up calls of its own.
pub type Factory<C, T> = fn(&C, Value) -> Result<T>;

/// The standard [`Factory`]: deserialize the resource object into `T`.
pub fn decode_resource<C, T: DeserializeOwned>(_client: &C, raw: Value) -> Result<T> {
    Ok(serde_json::from_value(raw)?)
}

/// Turn a server-provided next link into a path for [`Transport::fetch_page`].
///
/// Links under `base_url` lose that prefix so the follow-up request goes
/// through the same base as the first one. Links pointing elsewhere are kept
/// verbatim and fetched as absolute URLs.
pub fn strip_base_url(url: &str, base_url: &str) -> String {
    match url.strip_prefix(base_url) {
        Some(path) if path.is_empty() || path.starts_with('/') || path.starts_with('?') => {
            path.to_string()
        }
        _ => url.to_string(),
    }
}

/// Join a relative endpoint path onto the base URL; absolute URLs pass through.
pub(crate) fn resolve_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!("{}{}", base_url, path)
    }
}

/// Decode a response body, or map a non-success status to an [`Error`].
///
/// Shared by the async and blocking clients. An empty body (as sent with
/// `204 No Content`) decodes as JSON `null`, which suits `()` and `Option`.
pub(crate) fn decode_response<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T> {
    if (200..300).contains(&status) {
        if body.is_empty() {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        return Ok(serde_json::from_slice(body)?);
    }

    let body: Value = serde_json::from_slice(body).unwrap_or_default();
    Err(Error::from_api_response(status, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.up.com.au/api/v1";

    #[test]
    fn test_strip_base_url() {
        let next = "https://api.up.com.au/api/v1/tags?page%5Bafter%5D=WyJQaXp6YSBOaWdodCJd&page%5Bsize%5D=2";
        assert_eq!(
            strip_base_url(next, BASE),
            "/tags?page%5Bafter%5D=WyJQaXp6YSBOaWdodCJd&page%5Bsize%5D=2"
        );
    }

    #[test]
    fn test_strip_base_url_foreign_host() {
        let next = "https://elsewhere.example/api/v1/tags?page%5Bafter%5D=abc";
        assert_eq!(strip_base_url(next, BASE), next);

        // A shared prefix that is not a path boundary is not the base URL.
        let next = "https://api.up.com.au/api/v10/tags";
        assert_eq!(strip_base_url(next, BASE), next);
    }

    #[test]
    fn test_resolve_url() {
        assert_eq!(resolve_url(BASE, "/accounts"), format!("{}/accounts", BASE));
        assert_eq!(
            resolve_url(BASE, "https://elsewhere.example/x"),
            "https://elsewhere.example/x"
        );
    }

    #[test]
    fn test_raw_page_without_links() {
        let page: RawPage = serde_json::from_str(r#"{"data": [{"id": "a"}]}"#).unwrap();
        assert_eq!(page.data.len(), 1);
        assert!(page.links.next.is_none());
    }

    #[test]
    fn test_raw_page_null_next() {
        let page: RawPage =
            serde_json::from_str(r#"{"data": [], "links": {"prev": null, "next": null}}"#)
                .unwrap();
        assert!(page.data.is_empty());
        assert!(page.links.next.is_none());
    }

    #[test]
    fn test_decode_response_empty_body() {
        decode_response::<()>(204, b"").unwrap();
        let missing: Option<Value> = decode_response(204, b"").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_decode_response_error_body() {
        let body = br#"{"errors":[{"status":"404","title":"Not Found","detail":"Specified resource does not exist."}]}"#;
        let err = decode_response::<Value>(404, body).unwrap_err();
        match err {
            Error::NotFound { detail } => assert_eq!(detail, "Specified resource does not exist."),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_response_unparseable_error_body() {
        let err = decode_response::<Value>(502, b"<html>bad gateway</html>").unwrap_err();
        assert!(err.is_server_error());
    }
}
