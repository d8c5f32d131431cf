//! Data models for the Up API.
//!
//! Responses follow the JSON:API format. Each model flattens a resource
//! object (`id`, `attributes` and `relationships`) into a plain struct, with
//! related resources reduced to their typed identifiers.
//!
//! - [`primitives`] - Typed identifiers like `AccountId` and `TagId`
//! - [`enums`] - Account types, transaction statuses, webhook event types
//! - [`account`] - Accounts and balances
//! - [`transaction`] - Transactions and their amounts
//! - [`category`] - Categories and tags
//! - [`webhook`] - Webhooks, delivery logs and events

pub mod primitives;
pub mod enums;
pub mod account;
pub mod transaction;
pub mod category;
pub mod webhook;
mod common;

// Re-export commonly used types
pub use primitives::*;
pub use enums::*;
pub use account::*;
pub use transaction::*;
pub use category::*;
pub use webhook::{
    Webhook, WebhookEvent, WebhookLog, WebhookResponse, MAX_WEBHOOK_DESCRIPTION_LEN,
};
pub use common::MoneyObject;

pub(crate) use common::{Document, PingResponse, ResourceIdentifier};
pub(crate) use webhook::CreateWebhookRequest;
