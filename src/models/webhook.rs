//! Webhook models.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::common::{Document, Resource, ToOne};
use super::enums::{WebhookDeliveryStatus, WebhookEventType};
use super::primitives::{TransactionId, WebhookId};

/// Maximum length of a webhook description accepted by the API.
pub const MAX_WEBHOOK_DESCRIPTION_LEN: usize = 64;

/// A registered webhook.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "Resource<WebhookAttributes>")]
pub struct Webhook {
    /// Unique webhook id
    pub id: WebhookId,
    /// The URL events are `POST`ed to
    pub url: String,
    /// Description given at creation
    pub description: Option<String>,
    /// Key used to sign events.
    ///
    /// Only returned once, in the response to creating the webhook.
    pub secret_key: Option<SecretString>,
    /// When the webhook was created
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebhookAttributes {
    url: String,
    description: Option<String>,
    secret_key: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<Resource<WebhookAttributes>> for Webhook {
    fn from(resource: Resource<WebhookAttributes>) -> Self {
        let attributes = resource.attributes;
        Self {
            id: WebhookId::new(resource.id),
            url: attributes.url,
            description: attributes.description,
            secret_key: attributes.secret_key.map(SecretString::from),
            created_at: attributes.created_at,
        }
    }
}

/// Request body of `POST /webhooks`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateWebhookRequest<'a> {
    data: CreateWebhookData<'a>,
}

#[derive(Debug, Serialize)]
struct CreateWebhookData<'a> {
    attributes: CreateWebhookAttributes<'a>,
}

#[derive(Debug, Serialize)]
struct CreateWebhookAttributes<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

impl<'a> CreateWebhookRequest<'a> {
    pub(crate) fn new(url: &'a str, description: Option<&'a str>) -> Self {
        Self {
            data: CreateWebhookData {
                attributes: CreateWebhookAttributes { url, description },
            },
        }
    }
}

/// An event delivered to a webhook.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Resource<WebhookEventAttributes, WebhookEventRelationships>")]
pub struct WebhookEvent {
    /// Unique event id
    pub id: String,
    /// What happened
    pub event_type: WebhookEventType,
    /// When the event was generated
    pub created_at: DateTime<Utc>,
    /// The webhook the event was sent to
    pub webhook_id: WebhookId,
    /// The affected transaction, for transaction events
    pub transaction_id: Option<TransactionId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebhookEventAttributes {
    event_type: WebhookEventType,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
struct WebhookEventRelationships {
    webhook: Option<ToOne>,
    transaction: Option<ToOne>,
}

impl From<Resource<WebhookEventAttributes, WebhookEventRelationships>> for WebhookEvent {
    fn from(resource: Resource<WebhookEventAttributes, WebhookEventRelationships>) -> Self {
        let relationships = resource.relationships;
        Self {
            id: resource.id,
            event_type: resource.attributes.event_type,
            created_at: resource.attributes.created_at,
            webhook_id: WebhookId::new(
                relationships
                    .webhook
                    .and_then(ToOne::id)
                    .unwrap_or_default(),
            ),
            transaction_id: relationships
                .transaction
                .and_then(ToOne::id)
                .map(TransactionId::new),
        }
    }
}

/// The receiver's answer to a webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    /// HTTP status code returned by the receiver
    pub status_code: u16,
    /// Body returned by the receiver
    pub body: String,
}

/// One delivery attempt of a webhook event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Resource<WebhookLogAttributes>")]
pub struct WebhookLog {
    /// Unique log entry id
    pub id: String,
    /// The event that was delivered
    pub event: WebhookEvent,
    /// The receiver's answer; `None` if it could not be reached
    pub response: Option<WebhookResponse>,
    /// Outcome of the delivery
    pub delivery_status: WebhookDeliveryStatus,
    /// When the delivery was attempted
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebhookLogAttributes {
    request: WebhookRequest,
    response: Option<WebhookResponse>,
    delivery_status: WebhookDeliveryStatus,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct WebhookRequest {
    body: String,
}

impl TryFrom<Resource<WebhookLogAttributes>> for WebhookLog {
    type Error = serde_json::Error;

    // The delivered event is embedded as a JSON string.
    fn try_from(resource: Resource<WebhookLogAttributes>) -> Result<Self, Self::Error> {
        let attributes = resource.attributes;
        let event: Document<WebhookEvent> = serde_json::from_str(&attributes.request.body)?;
        Ok(Self {
            id: resource.id,
            event: event.data,
            response: attributes.response,
            delivery_status: attributes.delivery_status,
            created_at: attributes.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn event_json() -> serde_json::Value {
        serde_json::json!({
            "type": "webhook-events",
            "id": "f4f5c3b1-3fd4-4bde-8cd3-6a2bde3b5bb9",
            "attributes": {
                "eventType": "TRANSACTION_CREATED",
                "createdAt": "2022-03-21T10:20:05+11:00"
            },
            "relationships": {
                "webhook": {
                    "data": { "type": "webhooks", "id": "1f4eb0a8-8c4f-4a1f-9c54-cd2f1fe4b3e0" }
                },
                "transaction": {
                    "data": { "type": "transactions", "id": "34642cf9-7017-41b4-ac52-98f955d5fe48" }
                }
            }
        })
    }

    #[test]
    fn test_deserialize_webhook_with_secret() {
        let json = r#"{
            "type": "webhooks",
            "id": "1f4eb0a8-8c4f-4a1f-9c54-cd2f1fe4b3e0",
            "attributes": {
                "url": "https://example.com/hook",
                "description": "Sync",
                "secretKey": "s3cr3t",
                "createdAt": "2022-03-21T10:12:05+11:00"
            }
        }"#;

        let webhook: Webhook = serde_json::from_str(json).unwrap();
        assert_eq!(webhook.url, "https://example.com/hook");
        assert_eq!(webhook.description.as_deref(), Some("Sync"));
        assert_eq!(webhook.secret_key.as_ref().unwrap().expose_secret(), "s3cr3t");
        assert!(!format!("{:?}", webhook).contains("s3cr3t"));
    }

    #[test]
    fn test_deserialize_event() {
        let event: WebhookEvent = serde_json::from_value(event_json()).unwrap();
        assert_eq!(event.event_type, WebhookEventType::TransactionCreated);
        assert_eq!(event.webhook_id.as_str(), "1f4eb0a8-8c4f-4a1f-9c54-cd2f1fe4b3e0");
        assert_eq!(
            event.transaction_id,
            Some(TransactionId::new("34642cf9-7017-41b4-ac52-98f955d5fe48"))
        );
    }

    #[test]
    fn test_deserialize_log_parses_embedded_event() {
        let body = serde_json::json!({ "data": event_json() }).to_string();
        let json = serde_json::json!({
            "type": "webhook-delivery-logs",
            "id": "a8b2d0f5-2f8a-4a36-a4b1-34b0fbe0b5b1",
            "attributes": {
                "request": { "body": body },
                "response": { "statusCode": 200, "body": "ok" },
                "deliveryStatus": "DELIVERED",
                "createdAt": "2022-03-21T10:20:06+11:00"
            }
        });

        let log: WebhookLog = serde_json::from_value(json).unwrap();
        assert_eq!(log.delivery_status, WebhookDeliveryStatus::Delivered);
        assert_eq!(log.response.unwrap().status_code, 200);
        assert_eq!(log.event.event_type, WebhookEventType::TransactionCreated);
    }

    #[test]
    fn test_log_with_malformed_request_body_fails() {
        let json = serde_json::json!({
            "type": "webhook-delivery-logs",
            "id": "x",
            "attributes": {
                "request": { "body": "not json" },
                "response": null,
                "deliveryStatus": "UNDELIVERABLE",
                "createdAt": "2022-03-21T10:20:06+11:00"
            }
        });

        assert!(serde_json::from_value::<WebhookLog>(json).is_err());
    }

    #[test]
    fn test_create_request_body() {
        let body = CreateWebhookRequest::new("https://example.com/hook", None);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "data": { "attributes": { "url": "https://example.com/hook" } } })
        );
    }
}
