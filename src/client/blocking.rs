//! Blocking HTTP client for the Up API.
//!
//! Mirrors [`UpClient`](crate::UpClient) on top of `reqwest::blocking`, for
//! programs without an async runtime. Listing calls return
//! [`PaginatedList`](crate::client::PaginatedList)s, which fetch follow-up
//! pages on the calling thread.
//!
//! Like `reqwest::blocking`, this client must not be used from within an
//! async runtime.

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use secrecy::SecretString;
use serde::{de::DeserializeOwned, Serialize};

use crate::api::{
    AccountsService, CategoriesService, TagsService, TransactionsService, WebhooksService,
};
use crate::models::{Document, PingResponse};
use crate::Result;

use super::config::ClientConfig;
use super::http::{bearer_header, default_headers, log_rate_limit, token_from_env};
use super::paginated::PaginatedList;
use super::transport::{decode_resource, decode_response, resolve_url, RawPage, Transport};

/// The blocking client for the Up API.
///
/// # Example
///
/// ```no_run
/// use up_bank::blocking::UpClient;
/// use up_bank::api::TransactionsQuery;
///
/// # fn example() -> up_bank::Result<()> {
/// let client = UpClient::from_env()?;
///
/// let mut transactions = client.transactions().list(TransactionsQuery::default().limit(10))?;
/// for transaction in transactions.iter() {
///     let transaction = transaction?;
///     println!("{}", transaction.long_description());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct UpClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::blocking::Client,
    token: SecretString,
    config: ClientConfig,
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
        let http = reqwest::blocking::Client::builder()
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
    pub fn ping(&self) -> Result<String> {
        let response: PingResponse = self.get("/util/ping")?;
        Ok(response.meta.id)
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    fn request<T, Q, B>(
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
            .header(AUTHORIZATION, bearer_header(&self.inner.token)?);
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        log_rate_limit(response.headers());
        let bytes = response.bytes()?;
        decode_response(status, &bytes)
    }

    pub(crate) fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request::<T, (), ()>(Method::GET, path, None, None)
    }

    pub(crate) fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        self.request::<T, Q, ()>(Method::GET, path, Some(query), None)
    }

    pub(crate) fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let document: Document<T> = self.get(path)?;
        Ok(document.data)
    }

    pub(crate) fn get_list<T, Q>(
        &self,
        path: &str,
        query: &Q,
        limit: Option<usize>,
    ) -> Result<PaginatedList<T, Self>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let first_page: RawPage = self.get_with_query(path, query)?;
        tracing::debug!(path, fetched = first_page.data.len(), "fetched first page");
        PaginatedList::new(self.clone(), decode_resource::<Self, T>, first_page, limit)
    }

    pub(crate) fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        self.request::<T, (), B>(Method::POST, path, None, body)
    }

    pub(crate) fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.request::<T, (), B>(Method::PATCH, path, None, Some(body))
    }

    pub(crate) fn delete<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        self.request::<T, (), B>(Method::DELETE, path, None, body)
    }
}

impl Transport for UpClient {
    fn base_url(&self) -> &str {
        &self.inner.config.base_url
    }

    fn fetch_page(&self, path: &str) -> Result<RawPage> {
        self.get(path)
    }
}

impl std::fmt::Debug for UpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("blocking::UpClient")
            .field("config", &self.inner.config)
            .finish()
    }
}
