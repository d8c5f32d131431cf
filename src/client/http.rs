//! Async HTTP client implementation for the Up API.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};

use crate::api::{
    AccountsService, CategoriesService, TagsService, TransactionsService, WebhooksService,
};
use crate::models::{Document, PingResponse};
use crate::{Error, Result};

use super::config::{ClientConfig, TOKEN_ENV_VAR};
use super::paginated::AsyncPaginatedList;
use super::transport::{
    decode_resource, decode_response, resolve_url, AsyncTransport, BoxFuture, RawPage,
};

/// Response header carrying the number of requests left for the token.
pub(crate) const RATE_LIMIT_HEADER: &str = "X-RateLimit-Remaining";

/// The async client for the Up API.
///
/// Cloning is cheap: clones share one connection pool and token. Every
/// paginated list keeps a clone to fetch its follow-up pages.
///
/// # Example
///
/// ```no_run
/// use up_bank::UpClient;
/// use up_bank::api::AccountsQuery;
///
/// # async fn example() -> up_bank::Result<()> {
/// let client = UpClient::from_env()?;
///
/// let user_id = client.ping().await?;
/// println!("Authenticated as {}", user_id);
///
/// let mut accounts = client.accounts().list(AccountsQuery::default()).await?;
/// for account in accounts.fetch_all().await? {
///     println!("{}: {}", account.display_name, account.balance);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct UpClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) token: SecretString,
    pub(crate) config: ClientConfig,
}

impl UpClient {
    /// Create a client authenticating with a personal access token.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_config(token, ClientConfig::default())
    }

    /// Create a client with the token from the `UP_TOKEN` environment variable.
    pub fn from_env() -> Result<Self> {
        Self::new(token_from_env()?)
    }

    /// Create a client with a token and custom configuration.
    pub fn with_config(token: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .default_headers(default_headers())
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                token: SecretString::from(token.into()),
                config,
            }),
        })
    }

    /// Get the accounts service.
    pub fn accounts(&self) -> AccountsService<Self> {
        AccountsService::new(self.clone())
    }

    /// Get the transactions service.
    pub fn transactions(&self) -> TransactionsService<Self> {
        TransactionsService::new(self.clone())
    }

    /// Get the categories service.
    pub fn categories(&self) -> CategoriesService<Self> {
        CategoriesService::new(self.clone())
    }

    /// Get the tags service.
    pub fn tags(&self) -> TagsService<Self> {
        TagsService::new(self.clone())
    }

    /// Get the webhooks service.
    pub fn webhooks(&self) -> WebhooksService<Self> {
        WebhooksService::new(self.clone())
    }

    /// Check the token and return the id of the user it belongs to.
    pub async fn ping(&self) -> Result<String> {
        let response: PingResponse = self.get("/util/ping").await?;
        Ok(response.meta.id)
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }
}

impl ClientInner {
    fn bearer(&self) -> Result<HeaderValue> {
        bearer_header(&self.token)
    }
}

impl UpClient {
    /// Send a request and decode the JSON body as `T`.
    async fn request<T, Q, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let url = resolve_url(&self.inner.config.base_url, path);
        tracing::trace!(%method, %url, "sending request");

        let mut request = self
            .inner
            .http
            .request(method, &url)
            .header(AUTHORIZATION, self.inner.bearer()?);
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        log_rate_limit(response.headers());
        let bytes = response.bytes().await?;
        decode_response(status, &bytes)
    }

    /// Make a GET request.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request::<T, (), ()>(Method::GET, path, None, None).await
    }

    /// Make a GET request with query parameters.
    pub(crate) async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        self.request::<T, Q, ()>(Method::GET, path, Some(query), None).await
    }

    /// Make a GET request and unwrap the `data` member of the document.
    pub(crate) async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let document: Document<T> = self.get(path).await?;
        Ok(document.data)
    }

    /// Fetch the first page of a collection and wrap it in a lazy list.
    pub(crate) async fn get_list<T, Q>(
        &self,
        path: &str,
        query: &Q,
        limit: Option<usize>,
    ) -> Result<AsyncPaginatedList<T, Self>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let first_page: RawPage = self.get_with_query(path, query).await?;
        tracing::debug!(path, fetched = first_page.data.len(), "fetched first page");
        AsyncPaginatedList::new(self.clone(), decode_resource::<Self, T>, first_page, limit)
    }

    /// Make a POST request.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        self.request::<T, (), B>(Method::POST, path, None, body).await
    }

    /// Make a PATCH request.
    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.request::<T, (), B>(Method::PATCH, path, None, Some(body)).await
    }

    /// Make a DELETE request.
    pub(crate) async fn delete<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        self.request::<T, (), B>(Method::DELETE, path, None, body).await
    }
}

impl AsyncTransport for UpClient {
    fn base_url(&self) -> &str {
        &self.inner.config.base_url
    }

    fn fetch_page<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<RawPage>> {
        Box::pin(self.get(path))
    }
}

impl std::fmt::Debug for UpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpClient")
            .field("config", &self.inner.config)
            .finish()
    }
}

/// Read the token from `UP_TOKEN`.
pub(crate) fn token_from_env() -> Result<String> {
    std::env::var(TOKEN_ENV_VAR)
        .map_err(|_| Error::Config(format!("{} environment variable is not set", TOKEN_ENV_VAR)))
}

/// Headers sent with every request.
pub(crate) fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Build the `Authorization` header for a token.
pub(crate) fn bearer_header(token: &SecretString) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
        .map_err(|_| Error::InvalidInput("Invalid token format".to_string()))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Log the remaining request allowance reported by the API.
pub(crate) fn log_rate_limit(headers: &HeaderMap) {
    let remaining = headers
        .get(RATE_LIMIT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    match remaining {
        Some(0) => tracing::warn!("rate limit exhausted for this token"),
        Some(remaining) => tracing::trace!(remaining, "rate limit remaining"),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header() {
        let token = SecretString::from("up:yeah:abc123".to_string());
        let header = bearer_header(&token).unwrap();
        assert_eq!(header.to_str().unwrap(), "Bearer up:yeah:abc123");
        assert!(header.is_sensitive());
    }

    #[test]
    fn test_bearer_header_rejects_control_characters() {
        let token = SecretString::from("bad\ntoken".to_string());
        assert!(matches!(bearer_header(&token), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_debug_hides_token() {
        let client = UpClient::new("up:yeah:secret").unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("secret"));
    }
}
