//! Webhooks service.

use url::Url;

#[cfg(feature = "blocking")]
use crate::client::{blocking, PaginatedList};
use crate::client::{AsyncPaginatedList, UpClient};
use crate::models::{
    CreateWebhookRequest, Document, Webhook, WebhookEvent, WebhookId, WebhookLog,
    MAX_WEBHOOK_DESCRIPTION_LEN,
};
use crate::{Error, Result};

use super::ListOptions;

/// Service for webhook operations.
///
/// # Example
///
/// ```no_run
/// use secrecy::ExposeSecret;
///
/// # async fn example(client: up_bank::UpClient) -> up_bank::Result<()> {
/// let webhook = client
///     .webhooks()
///     .create("https://example.com/up-events", Some("Budget sync"))
///     .await?;
///
/// // The secret key is only returned on creation.
/// if let Some(key) = &webhook.secret_key {
///     store_signing_key(key.expose_secret());
/// }
///
/// let event = client.webhooks().ping(&webhook.id).await?;
/// println!("Sent {:?} event {}", event.event_type, event.id);
/// # Ok(())
/// # }
/// # fn store_signing_key(_key: &str) {}
/// ```
#[derive(Debug, Clone)]
pub struct WebhooksService<C> {
    client: C,
}

/// Check the arguments of a create call before anything is sent.
fn validate_create(url: &str, description: Option<&str>) -> Result<()> {
    let parsed = Url::parse(url)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::InvalidInput(format!(
            "webhook URL must use http or https, got {}",
            parsed.scheme()
        )));
    }

    if let Some(description) = description {
        let len = description.chars().count();
        if len > MAX_WEBHOOK_DESCRIPTION_LEN {
            return Err(Error::InvalidInput(format!(
                "webhook description is {} characters, at most {} are allowed",
                len, MAX_WEBHOOK_DESCRIPTION_LEN
            )));
        }
    }
    Ok(())
}

impl<C> WebhooksService<C> {
    pub(crate) fn new(client: C) -> Self {
        Self { client }
    }
}

impl WebhooksService<UpClient> {
    /// List webhooks, oldest first, lazily paginated.
    pub async fn list(&self, options: ListOptions) -> Result<AsyncPaginatedList<Webhook, UpClient>> {
        let options = options.resolve(self.client.config().page_size);
        self.client.get_list("/webhooks", &options, options.limit).await
    }

    /// Get a specific webhook by ID.
    pub async fn get(&self, id: &WebhookId) -> Result<Webhook> {
        self.client.get_data(&format!("/webhooks/{}", id)).await
    }

    /// Register a webhook that receives events at `url`.
    ///
    /// The returned webhook carries its `secret_key`; it is not available
    /// afterwards.
    pub async fn create(&self, url: &str, description: Option<&str>) -> Result<Webhook> {
        validate_create(url, description)?;
        let document: Document<Webhook> = self
            .client
            .post("/webhooks", Some(&CreateWebhookRequest::new(url, description)))
            .await?;
        tracing::info!(id = %document.data.id, "created webhook");
        Ok(document.data)
    }

    /// Send a `PING` event to a webhook.
    pub async fn ping(&self, id: &WebhookId) -> Result<WebhookEvent> {
        let document: Document<WebhookEvent> = self
            .client
            .post::<_, ()>(&format!("/webhooks/{}/ping", id), None)
            .await?;
        Ok(document.data)
    }

    /// List delivery logs of a webhook, newest first, lazily paginated.
    pub async fn logs(
        &self,
        id: &WebhookId,
        options: ListOptions,
    ) -> Result<AsyncPaginatedList<WebhookLog, UpClient>> {
        let options = options.resolve(self.client.config().page_size);
        self.client
            .get_list(&format!("/webhooks/{}/logs", id), &options, options.limit)
            .await
    }

    /// Delete a webhook.
    pub async fn delete(&self, id: &WebhookId) -> Result<()> {
        self.client
            .delete::<(), ()>(&format!("/webhooks/{}", id), None)
            .await?;
        tracing::info!(%id, "deleted webhook");
        Ok(())
    }
}

#[cfg(feature = "blocking")]
impl WebhooksService<blocking::UpClient> {
    /// List webhooks, oldest first, lazily paginated.
    pub fn list(&self, options: ListOptions) -> Result<PaginatedList<Webhook, blocking::UpClient>> {
        let options = options.resolve(self.client.config().page_size);
        self.client.get_list("/webhooks", &options, options.limit)
    }

    /// Get a specific webhook by ID.
    pub fn get(&self, id: &WebhookId) -> Result<Webhook> {
        self.client.get_data(&format!("/webhooks/{}", id))
    }

    /// Register a webhook that receives events at `url`.
    ///
    /// The returned webhook carries its `secret_key`; it is not available
    /// afterwards.
    pub fn create(&self, url: &str, description: Option<&str>) -> Result<Webhook> {
        validate_create(url, description)?;
        let document: Document<Webhook> = self
            .client
            .post("/webhooks", Some(&CreateWebhookRequest::new(url, description)))?;
        tracing::info!(id = %document.data.id, "created webhook");
        Ok(document.data)
    }

    /// Send a `PING` event to a webhook.
    pub fn ping(&self, id: &WebhookId) -> Result<WebhookEvent> {
        let document: Document<WebhookEvent> = self
            .client
            .post::<_, ()>(&format!("/webhooks/{}/ping", id), None)?;
        Ok(document.data)
    }

    /// List delivery logs of a webhook, newest first, lazily paginated.
    pub fn logs(
        &self,
        id: &WebhookId,
        options: ListOptions,
    ) -> Result<PaginatedList<WebhookLog, blocking::UpClient>> {
        let options = options.resolve(self.client.config().page_size);
        self.client
            .get_list(&format!("/webhooks/{}/logs", id), &options, options.limit)
    }

    /// Delete a webhook.
    pub fn delete(&self, id: &WebhookId) -> Result<()> {
        self.client.delete::<(), ()>(&format!("/webhooks/{}", id), None)?;
        tracing::info!(%id, "deleted webhook");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_create() {
        assert!(validate_create("https://example.com/hook", Some("Budget sync")).is_ok());
        assert!(validate_create("https://example.com/hook", None).is_ok());
    }

    #[test]
    fn test_validate_create_rejects_bad_url() {
        assert!(matches!(
            validate_create("not a url", None),
            Err(Error::UrlParse(_))
        ));
        assert!(matches!(
            validate_create("ftp://example.com/hook", None),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validate_create_description_length() {
        let exactly = "x".repeat(MAX_WEBHOOK_DESCRIPTION_LEN);
        assert!(validate_create("https://example.com", Some(&exactly)).is_ok());

        let too_long = "x".repeat(MAX_WEBHOOK_DESCRIPTION_LEN + 1);
        assert!(matches!(
            validate_create("https://example.com", Some(&too_long)),
            Err(Error::InvalidInput(_))
        ));
    }
}
